use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::AppState;
use crate::feed::FeedError;
use crate::models::*;
use crate::overview;
use crate::render;
use crate::sale::{self, SaleCalculator, SaleError};

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

fn sheep_not_found(id: &str) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("Sheep not found with ID: {}", id),
    )
}

fn feed_error(e: FeedError) -> (StatusCode, String) {
    match e {
        FeedError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        FeedError::Validation(_) => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

fn sale_error(e: SaleError) -> (StatusCode, String) {
    let status = match e {
        SaleError::SheepNotFound(_) => StatusCode::NOT_FOUND,
        SaleError::Unavailable { .. } => StatusCode::CONFLICT,
        SaleError::NothingSelected | SaleError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    tracing::warn!("Sale rejected: {}", e);
    (status, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Dashboard
// ============================================================

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let sheep = state.store.list();
    Json(overview::dashboard(
        &sheep,
        &state.feed_stock,
        state.store.load_error(),
    ))
}

// ============================================================
// Sheep
// ============================================================

pub async fn list_sheep(State(state): State<AppState>) -> Json<Vec<Sheep>> {
    Json(state.store.list())
}

pub async fn get_sheep(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Sheep>> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| sheep_not_found(&id))
}

pub async fn create_sheep(
    State(state): State<AppState>,
    Json(input): Json<NewSheep>,
) -> (StatusCode, Json<Sheep>) {
    let sheep = state.store.add(input);
    (StatusCode::CREATED, Json(sheep))
}

pub async fn update_sheep(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateSheepInput>,
) -> ApiResult<Json<Sheep>> {
    let sheep = input.into_sheep(id);
    if state.store.update(sheep.clone()) {
        Ok(Json(sheep))
    } else {
        Err(sheep_not_found(&sheep.id))
    }
}

pub async fn delete_sheep(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(sheep_not_found(&id))
    }
}

// ============================================================
// Herd Health
// ============================================================

pub async fn herd_health(
    State(state): State<AppState>,
    Query(query): Query<HealthQuery>,
) -> Json<HealthOverview> {
    let sheep = state.store.list();
    Json(overview::health_overview(&sheep, &query))
}

// ============================================================
// Feed Plan
// ============================================================

pub async fn list_feed(State(state): State<AppState>) -> Json<Vec<FeedEntryView>> {
    let plan = state.feed.lock().expect("feed plan lock poisoned");
    Json(plan.views())
}

pub async fn add_feed(
    State(state): State<AppState>,
    Json(entry): Json<FeedEntry>,
) -> ApiResult<(StatusCode, Json<FeedEntryView>)> {
    let mut plan = state.feed.lock().expect("feed plan lock poisoned");
    plan.add(entry)
        .map(|v| (StatusCode::CREATED, Json(v)))
        .map_err(feed_error)
}

pub async fn update_feed(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(entry): Json<FeedEntry>,
) -> ApiResult<Json<FeedEntryView>> {
    let mut plan = state.feed.lock().expect("feed plan lock poisoned");
    plan.edit(index, entry).map(Json).map_err(feed_error)
}

pub async fn delete_feed(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<StatusCode> {
    let mut plan = state.feed.lock().expect("feed plan lock poisoned");
    plan.delete(index)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(feed_error)
}

pub async fn feed_projection(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<FeedProjection>> {
    let plan = state.feed.lock().expect("feed plan lock poisoned");
    plan.projection(index).map(Json).map_err(feed_error)
}

pub async fn feed_chart(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<String> {
    let plan = state.feed.lock().expect("feed plan lock poisoned");
    let projection = plan.projection(index).map_err(feed_error)?;
    Ok(render::render_projection(&projection))
}

// ============================================================
// Sale Calculator
// ============================================================

pub async fn available_for_sale(State(state): State<AppState>) -> Json<Vec<Sheep>> {
    let sheep = state.store.list();
    Json(sale::available_for_sale(&sheep))
}

pub async fn quote_sale(
    State(state): State<AppState>,
    Json(input): Json<SaleInput>,
) -> ApiResult<Json<SaleQuote>> {
    let calc = SaleCalculator::from_input(&state.store, &input).map_err(sale_error)?;
    calc.quote().map(Json).map_err(sale_error)
}

pub async fn confirm_sale(
    State(state): State<AppState>,
    Json(input): Json<SaleInput>,
) -> ApiResult<Json<SaleConfirmation>> {
    let mut calc = SaleCalculator::from_input(&state.store, &input).map_err(sale_error)?;
    let invoice = calc.confirm(&state.store).map_err(sale_error)?;
    let printable = render::render_invoice(&invoice);
    Ok(Json(SaleConfirmation { invoice, printable }))
}
