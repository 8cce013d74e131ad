//! Flockbook: sheep records, feed planning and sale calculations for a
//! single farm, served over a small JSON API.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod feed;
pub mod fixtures;
pub mod models;
pub mod overview;
pub mod render;
pub mod sale;
pub mod store;
pub mod validation;
