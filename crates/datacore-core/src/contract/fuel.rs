//! Fuel log entries and their aggregate stats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelEntry {
    pub id: u64,
    pub date: NaiveDate,
    pub mileage: f64,
    pub gallons_added: f64,
    pub cost_per_gallon: f64,
    pub total_cost: f64,
    #[serde(default)]
    pub mpg: Option<f64>,
    #[serde(default)]
    pub missed_previous: Option<bool>,
}

impl FuelEntry {
    fn counts_for_mpg(&self) -> bool {
        !self.missed_previous.unwrap_or(false)
    }
}

/// Fuel form payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelDraft {
    pub date: NaiveDate,
    pub mileage: f64,
    pub gallons_added: f64,
    pub cost_per_gallon: f64,
    pub missed_previous: bool,
}

impl FuelDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.mileage > 0.0) {
            return Err(ValidationError::new("mileage", "Mileage must be positive"));
        }
        if !(self.gallons_added > 0.0) {
            return Err(ValidationError::new("gallons_added", "Gallons must be positive"));
        }
        if !(self.cost_per_gallon >= 0.0) {
            return Err(ValidationError::new("cost_per_gallon", "Price cannot be negative"));
        }
        Ok(())
    }

    /// Rounded to cents.
    pub fn total_cost(&self) -> f64 {
        (self.gallons_added * self.cost_per_gallon * 100.0).round() / 100.0
    }
}

/// Aggregates shown above the fuel log.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FuelStats {
    pub fill_ups: usize,
    pub total_cost: f64,
    pub total_gallons: f64,
    pub average_mpg: Option<f64>,
    pub best_mpg: Option<f64>,
    pub worst_mpg: Option<f64>,
}

impl FuelStats {
    /// Entries flagged `missed_previous` count toward cost and gallons but
    /// not toward MPG figures.
    pub fn from_entries(entries: &[FuelEntry]) -> Self {
        let mpgs: Vec<f64> = entries
            .iter()
            .filter(|e| e.counts_for_mpg())
            .filter_map(|e| e.mpg)
            .filter(|m| m.is_finite() && *m > 0.0)
            .collect();

        let average_mpg =
            (!mpgs.is_empty()).then(|| mpgs.iter().sum::<f64>() / mpgs.len() as f64);

        Self {
            fill_ups: entries.len(),
            total_cost: entries.iter().map(|e| e.total_cost).sum(),
            total_gallons: entries.iter().map(|e| e.gallons_added).sum(),
            average_mpg,
            best_mpg: mpgs.iter().copied().reduce(f64::max),
            worst_mpg: mpgs.iter().copied().reduce(f64::min),
        }
    }
}
