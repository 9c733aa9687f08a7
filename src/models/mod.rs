//! Data models
//!
//! Rust structs representing diary entities.

mod day;
mod food_entry;
mod meal;
mod nutrition;
mod targets;

pub use day::Day;
pub use food_entry::{recalculate_day_totals, FoodEntry, FoodEntryCreate, FoodEntryUpdate};
pub use meal::{MealCategory, PerMeal};
pub use nutrition::{NutrientSource, NutrientTotals};
pub use targets::NutrientTargets;
