//! Shared nutrient data structure
//!
//! Used by food entries, day caches, and the aggregation engine.

use serde::{Deserialize, Serialize};

/// Macro totals for an entry, a meal, or a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64, // kcal
    pub protein: f64,  // grams
    pub fat: f64,      // grams
    pub carbs: f64,    // grams
}

impl NutrientTotals {
    /// Create a new NutrientTotals with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
        }
    }

    /// Add another set of totals to this one
    pub fn add(&self, other: &NutrientTotals) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }

    /// Check that every value is a finite, non-negative number
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbs", self.carbs),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number", field));
            }
            if value < 0.0 {
                return Err(format!("{} must not be negative", field));
            }
        }
        Ok(())
    }
}

impl std::ops::Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, other: NutrientTotals) -> NutrientTotals {
        NutrientTotals::add(&self, &other)
    }
}

impl std::iter::Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientTotals::zero(), |acc, n| acc + n)
    }
}

/// Anything the aggregator can read macros from
pub trait NutrientSource {
    fn nutrients(&self) -> NutrientTotals;
}

impl NutrientSource for NutrientTotals {
    fn nutrients(&self) -> NutrientTotals {
        *self
    }
}

impl<T: NutrientSource + ?Sized> NutrientSource for &T {
    fn nutrients(&self) -> NutrientTotals {
        (**self).nutrients()
    }
}
