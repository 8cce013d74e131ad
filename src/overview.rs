//! Read-only summaries over the sheep list.

use crate::models::{
    DashboardSummary, FeedStockLevel, HealthOverview, HealthQuery, Sheep, StatusCounts,
};

pub fn dashboard(
    sheep: &[Sheep],
    feed_stock: &[FeedStockLevel],
    load_error: Option<String>,
) -> DashboardSummary {
    DashboardSummary {
        total: sheep.len(),
        counts: StatusCounts::tally(sheep),
        feed_stock: feed_stock.to_vec(),
        load_error,
    }
}

/// Counts always cover the whole herd; only the record list is filtered.
pub fn health_overview(sheep: &[Sheep], query: &HealthQuery) -> HealthOverview {
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    let filtered = sheep
        .iter()
        .filter(|s| query.status.matches(s.status))
        .filter(|s| needle.is_empty() || s.tag.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    HealthOverview {
        counts: StatusCounts::tally(sheep),
        sheep: filtered,
    }
}
