//! Feed plan and its stock arithmetic.
//!
//! All figures are computed from the entry's current fields on every call;
//! nothing about a projection is stored between requests.

use thiserror::Error;

use crate::models::{FeedCategory, FeedEntry, FeedEntryView, FeedFrequency, FeedProjection};
use crate::validation::{non_blank, non_negative, ValidationError};

/// Days covered by a depletion projection.
pub const PROJECTION_DAYS: usize = 14;

/// Days of feed a refill is costed for.
pub const REFILL_HORIZON_DAYS: f64 = 7.0;

#[derive(Debug, Error, PartialEq)]
pub enum FeedError {
    #[error("Feed plan entry {0} not found")]
    NotFound(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Kilograms consumed per day by the whole category.
pub fn daily_usage(entry: &FeedEntry) -> f64 {
    entry.ration_per_animal_kg * f64::from(entry.head_count) * entry.frequency.multiplier()
}

/// Whole days the current stock lasts. Zero when nothing is consumed.
pub fn days_remaining(entry: &FeedEntry) -> u64 {
    let usage = daily_usage(entry);
    if usage == 0.0 {
        return 0;
    }
    (entry.stock_kg / usage).floor() as u64
}

/// Stock left at the end of each of the next [`PROJECTION_DAYS`] days,
/// clamped at zero.
pub fn depletion_projection(entry: &FeedEntry) -> Vec<f64> {
    let usage = daily_usage(entry);
    let mut stock = entry.stock_kg;
    (0..PROJECTION_DAYS)
        .map(|_| {
            stock = (stock - usage).max(0.0);
            stock
        })
        .collect()
}

/// Cost of a week's feed for the category at the entry's price.
///
/// Uses the per-animal ration without the frequency multiplier.
pub fn refill_cost(entry: &FeedEntry) -> f64 {
    f64::from(entry.head_count) * entry.ration_per_animal_kg * REFILL_HORIZON_DAYS * entry.cost_per_kg
}

pub fn projection_labels() -> Vec<String> {
    (1..=PROJECTION_DAYS).map(|day| format!("Day {}", day)).collect()
}

fn view(index: usize, entry: &FeedEntry) -> FeedEntryView {
    FeedEntryView {
        index,
        entry: entry.clone(),
        daily_usage_kg: daily_usage(entry),
        days_remaining: days_remaining(entry),
        refill_cost: refill_cost(entry),
    }
}

fn validate_quantities(entry: &FeedEntry) -> Result<(), ValidationError> {
    non_negative("ration_per_animal_kg", entry.ration_per_animal_kg)?;
    non_negative("stock_kg", entry.stock_kg)?;
    non_negative("cost_per_kg", entry.cost_per_kg)?;
    Ok(())
}

/// Ordered list of feed plan entries, addressed by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPlan {
    entries: Vec<FeedEntry>,
}

impl FeedPlan {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }

    /// The plan a fresh service starts with.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            FeedEntry {
                category: FeedCategory::Lambs,
                feed_type: "Starter Pellets".to_string(),
                ration_per_animal_kg: 0.5,
                frequency: FeedFrequency::TwiceDaily,
                head_count: 15,
                stock_kg: 40.0,
                cost_per_kg: 6.0,
            },
            FeedEntry {
                category: FeedCategory::Ewes,
                feed_type: "Lucerne Hay".to_string(),
                ration_per_animal_kg: 1.8,
                frequency: FeedFrequency::OnceDaily,
                head_count: 30,
                stock_kg: 100.0,
                cost_per_kg: 4.0,
            },
            FeedEntry {
                category: FeedCategory::Rams,
                feed_type: "Grain Mix".to_string(),
                ration_per_animal_kg: 1.2,
                frequency: FeedFrequency::EveryTwoDays,
                head_count: 5,
                stock_kg: 20.0,
                cost_per_kg: 5.5,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&FeedEntry, FeedError> {
        self.entries.get(index).ok_or(FeedError::NotFound(index))
    }

    /// Every entry with its derived usage, days left and refill cost.
    pub fn views(&self) -> Vec<FeedEntryView> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| view(i, e))
            .collect()
    }

    /// Append an entry. It needs a feed type and at least one animal.
    pub fn add(&mut self, entry: FeedEntry) -> Result<FeedEntryView, FeedError> {
        non_blank("feed_type", &entry.feed_type)?;
        if entry.head_count == 0 {
            return Err(ValidationError::new("head_count", "must be at least 1").into());
        }
        validate_quantities(&entry)?;

        tracing::debug!(
            "Adding feed plan entry {} / {}",
            entry.category.as_str(),
            entry.feed_type
        );
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        Ok(view(index, &self.entries[index]))
    }

    /// Replace the entry at `index`.
    pub fn edit(&mut self, index: usize, entry: FeedEntry) -> Result<FeedEntryView, FeedError> {
        validate_quantities(&entry)?;
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(FeedError::NotFound(index))?;
        *slot = entry;
        Ok(view(index, slot))
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<FeedEntry, FeedError> {
        if index >= self.entries.len() {
            return Err(FeedError::NotFound(index));
        }
        Ok(self.entries.remove(index))
    }

    pub fn projection(&self, index: usize) -> Result<FeedProjection, FeedError> {
        let entry = self.get(index)?;
        Ok(FeedProjection {
            index,
            category: entry.category,
            labels: projection_labels(),
            values: depletion_projection(entry),
            daily_usage_kg: daily_usage(entry),
            days_remaining: days_remaining(entry),
            refill_cost: refill_cost(entry),
        })
    }
}
