//! Sale calculator.
//!
//! A [`SaleCalculator`] holds the transient state of one sale: which animal is
//! selected, its estimated weight and the price per kg. Confirming marks the
//! animal Sold through the record store and clears the selection and weight.

use chrono::Utc;
use thiserror::Error;

use crate::models::{Invoice, SaleInput, SaleQuote, Sheep};
use crate::store::SheepStore;
use crate::validation::{non_negative, ValidationError};

/// Rate offered when the caller does not supply one.
pub const DEFAULT_PRICE_PER_KG: f64 = 80.0;

#[derive(Debug, Error, PartialEq)]
pub enum SaleError {
    #[error("Sheep not found with ID: {0}")]
    SheepNotFound(String),

    #[error("Sheep {tag} is {status} and cannot be sold")]
    Unavailable { tag: String, status: &'static str },

    #[error("No sheep selected")]
    NothingSelected,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Unrounded sale value.
pub fn compute_sale_value(weight_kg: f64, price_per_kg: f64) -> f64 {
    weight_kg * price_per_kg
}

/// Two-decimal rendering of a money amount.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Records the calculator may offer: anything not Sold or Dead.
pub fn available_for_sale(sheep: &[Sheep]) -> Vec<Sheep> {
    sheep
        .iter()
        .filter(|s| s.is_available_for_sale())
        .cloned()
        .collect()
}

pub(crate) fn ensure_available(sheep: &Sheep) -> Result<(), SaleError> {
    if sheep.is_available_for_sale() {
        Ok(())
    } else {
        Err(SaleError::Unavailable {
            tag: sheep.tag.clone(),
            status: sheep.status.as_str(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SaleCalculator {
    selected: Option<Sheep>,
    weight_kg: f64,
    price_per_kg: f64,
}

impl Default for SaleCalculator {
    fn default() -> Self {
        Self {
            selected: None,
            weight_kg: 0.0,
            price_per_kg: DEFAULT_PRICE_PER_KG,
        }
    }
}

impl SaleCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a calculator with the selection, weight and rate from a request.
    pub fn from_input(store: &SheepStore, input: &SaleInput) -> Result<Self, SaleError> {
        let mut calc = Self::new();
        calc.select(store, &input.sheep_id)?;
        calc.set_weight(input.weight_kg)?;
        if let Some(price) = input.price_per_kg {
            calc.set_price(price)?;
        }
        Ok(calc)
    }

    /// Select an animal. Sold and Dead records cannot be selected.
    pub fn select(&mut self, store: &SheepStore, id: &str) -> Result<&Sheep, SaleError> {
        let sheep = store
            .get(id)
            .ok_or_else(|| SaleError::SheepNotFound(id.to_string()))?;
        ensure_available(&sheep)?;
        Ok(&*self.selected.insert(sheep))
    }

    pub fn set_weight(&mut self, weight_kg: f64) -> Result<(), SaleError> {
        self.weight_kg = non_negative("weight_kg", weight_kg)?;
        Ok(())
    }

    pub fn set_price(&mut self, price_per_kg: f64) -> Result<(), SaleError> {
        self.price_per_kg = non_negative("price_per_kg", price_per_kg)?;
        Ok(())
    }

    pub fn selected(&self) -> Option<&Sheep> {
        self.selected.as_ref()
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn price_per_kg(&self) -> f64 {
        self.price_per_kg
    }

    pub fn sale_value(&self) -> f64 {
        compute_sale_value(self.weight_kg, self.price_per_kg)
    }

    pub fn quote(&self) -> Result<SaleQuote, SaleError> {
        let sheep = self.selected.as_ref().ok_or(SaleError::NothingSelected)?;
        let value = self.sale_value();
        Ok(SaleQuote {
            sheep_id: sheep.id.clone(),
            tag: sheep.tag.clone(),
            weight_kg: self.weight_kg,
            price_per_kg: self.price_per_kg,
            value,
            value_display: format_amount(value),
        })
    }

    /// Mark the selected animal Sold and issue an invoice.
    ///
    /// Availability is checked against the store's current record, not the
    /// copy taken at selection. On success the selection and weight are
    /// cleared; the rate stays.
    pub fn confirm(&mut self, store: &SheepStore) -> Result<Invoice, SaleError> {
        let selected = self.selected.as_ref().ok_or(SaleError::NothingSelected)?;
        let sold = store.mark_sold(&selected.id)?;

        let total = self.sale_value();
        let invoice = Invoice {
            notice: format!("Sheep {} marked as SOLD.", sold.tag),
            sheep_id: sold.id,
            tag: sold.tag,
            breed: sold.breed,
            weight_kg: self.weight_kg,
            price_per_kg: self.price_per_kg,
            total,
            total_display: format_amount(total),
            issued_at: Utc::now(),
        };
        tracing::info!("{} Total R{}", invoice.notice, invoice.total_display);

        self.selected = None;
        self.weight_kg = 0.0;
        Ok(invoice)
    }
}
