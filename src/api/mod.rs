mod handlers;

use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post, put, delete},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::feed::FeedPlan;
use crate::fixtures::Fixtures;
use crate::models::FeedStockLevel;
use crate::store::SheepStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SheepStore,
    pub feed: Arc<Mutex<FeedPlan>>,
    pub feed_stock: Arc<Vec<FeedStockLevel>>,
}

impl AppState {
    /// State with the default feed plan.
    pub fn new(store: SheepStore, feed_stock: Vec<FeedStockLevel>) -> Self {
        Self {
            store,
            feed: Arc::new(Mutex::new(FeedPlan::with_defaults())),
            feed_stock: Arc::new(feed_stock),
        }
    }

    /// Load the sheep list and the feed stock fixture.
    ///
    /// Fixture failures never abort startup: the sheep list stays empty with
    /// the error kept for the dashboard, and feed stock falls back to nothing.
    pub async fn initialize(db: Database, fixtures: &Fixtures) -> Self {
        let store = SheepStore::new(db);
        store.initialize(fixtures).await;

        let feed_stock = match fixtures.load_feed_stock().await {
            Ok(levels) => levels,
            Err(e) => {
                tracing::warn!("Failed to load feed fixture: {}", e);
                Vec::new()
            }
        };

        Self::new(store, feed_stock)
    }
}

pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, CorsLayer::permissive())
}

pub fn create_router_with_cors(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        // Dashboard
        .route("/dashboard", get(handlers::dashboard))
        // Sheep records
        .route("/sheep", get(handlers::list_sheep))
        .route("/sheep", post(handlers::create_sheep))
        .route("/sheep/{id}", get(handlers::get_sheep))
        .route("/sheep/{id}", put(handlers::update_sheep))
        .route("/sheep/{id}", delete(handlers::delete_sheep))
        // Herd health
        .route("/herd/health", get(handlers::herd_health))
        // Feed plan (entries addressed by position)
        .route("/feed", get(handlers::list_feed))
        .route("/feed", post(handlers::add_feed))
        .route("/feed/{index}", put(handlers::update_feed))
        .route("/feed/{index}", delete(handlers::delete_feed))
        .route("/feed/{index}/projection", get(handlers::feed_projection))
        .route("/feed/{index}/chart", get(handlers::feed_chart))
        // Sale calculator
        .route("/sale/available", get(handlers::available_for_sale))
        .route("/sale/quote", post(handlers::quote_sale))
        .route("/sale/confirm", post(handlers::confirm_sale))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
