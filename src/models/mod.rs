//! Domain models for Flockbook.
//!
//! # Core Concepts
//!
//! ## Persisted
//!
//! - [`Sheep`]: A single animal record. The full list of records is the only
//!   thing written to disk, as one snapshot under a fixed key.
//!
//! ## Service-lifetime
//!
//! - [`FeedEntry`]: One line of the feed plan (category, ration, stock, cost).
//!   The plan lives as long as the running service and is never persisted.
//! - [`FeedStockLevel`]: Category/stock pairs from the feed fixture, shown on
//!   the dashboard.
//!
//! ## Transient
//!
//! - [`SaleQuote`] and [`Invoice`]: Results of the sale calculator. They carry no
//!   identity of their own and exist to drive the Sold transition of a record.

mod feed;
mod overview;
mod sale;
mod sheep;

pub use feed::*;
pub use overview::*;
pub use sale::*;
pub use sheep::*;
