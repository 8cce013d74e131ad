use serde::{Deserialize, Serialize};

use super::{FeedStockLevel, Sheep, SheepStatus};

/// Number of records in each status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub healthy: usize,
    pub sick: usize,
    pub sold: usize,
    pub dead: usize,
}

impl StatusCounts {
    pub fn tally<'a>(sheep: impl IntoIterator<Item = &'a Sheep>) -> Self {
        let mut counts = Self::default();
        for s in sheep {
            match s.status {
                SheepStatus::Healthy => counts.healthy += 1,
                SheepStatus::Sick => counts.sick += 1,
                SheepStatus::Sold => counts.sold += 1,
                SheepStatus::Dead => counts.dead += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: SheepStatus) -> usize {
        match status {
            SheepStatus::Healthy => self.healthy,
            SheepStatus::Sick => self.sick,
            SheepStatus::Sold => self.sold,
            SheepStatus::Dead => self.dead,
        }
    }

    pub fn total(&self) -> usize {
        self.healthy + self.sick + self.sold + self.dead
    }
}

/// Figures shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub feed_stock: Vec<FeedStockLevel>,
    /// Set when the sheep fixture could not be loaded at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

/// Status filter for the health overview. `All` disables filtering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Healthy,
    Sick,
    Sold,
    Dead,
}

impl StatusFilter {
    pub fn matches(&self, status: SheepStatus) -> bool {
        match self {
            Self::All => true,
            Self::Healthy => status == SheepStatus::Healthy,
            Self::Sick => status == SheepStatus::Sick,
            Self::Sold => status == SheepStatus::Sold,
            Self::Dead => status == SheepStatus::Dead,
        }
    }
}

/// Query parameters for the health overview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthQuery {
    #[serde(default)]
    pub status: StatusFilter,
    /// Case-insensitive substring of the tag.
    #[serde(default)]
    pub search: Option<String>,
}

/// Herd health page: counts for every status plus the filtered records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthOverview {
    pub counts: StatusCounts,
    pub sheep: Vec<Sheep>,
}
