use serde::{Deserialize, Serialize};

/// Animal group a feed plan entry applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FeedCategory {
    Lambs,
    Ewes,
    Rams,
}

impl FeedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lambs => "Lambs",
            Self::Ewes => "Ewes",
            Self::Rams => "Rams",
        }
    }
}

/// How often a ration is fed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FeedFrequency {
    #[serde(rename = "Once Daily")]
    OnceDaily,
    #[serde(rename = "Twice Daily")]
    TwiceDaily,
    #[serde(rename = "Every 2 Days")]
    EveryTwoDays,
}

impl FeedFrequency {
    /// Rations fed per day.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::OnceDaily => 1.0,
            Self::TwiceDaily => 2.0,
            Self::EveryTwoDays => 0.5,
        }
    }
}

/// One line of the feed plan.
///
/// Entries have no id; they are addressed by their position in the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedEntry {
    pub category: FeedCategory,
    pub feed_type: String,
    /// Ration per animal per feeding, in kg.
    pub ration_per_animal_kg: f64,
    pub frequency: FeedFrequency,
    /// Number of animals in this category.
    pub head_count: u32,
    /// Feed currently on hand, in kg.
    pub stock_kg: f64,
    pub cost_per_kg: f64,
}

/// A feed plan entry together with the figures derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedEntryView {
    pub index: usize,
    #[serde(flatten)]
    pub entry: FeedEntry,
    pub daily_usage_kg: f64,
    pub days_remaining: u64,
    pub refill_cost: f64,
}

/// Day-by-day stock projection for one feed plan entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedProjection {
    pub index: usize,
    pub category: FeedCategory,
    /// `Day 1` through `Day 14`.
    pub labels: Vec<String>,
    /// Projected stock in kg at the end of each labelled day.
    pub values: Vec<f64>,
    pub daily_usage_kg: f64,
    pub days_remaining: u64,
    pub refill_cost: f64,
}

/// Stock on hand for one feed category, as shipped in the feed fixture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedStockLevel {
    pub category: String,
    #[serde(alias = "stockKg")]
    pub stock_kg: f64,
}
