//! Food Entry MCP Tools
//!
//! Tools for logging, editing and removing food entries.

use serde::Serialize;

use crate::db::{Database, DbError};
use crate::models::{Day, FoodEntry, FoodEntryCreate, FoodEntryUpdate, MealCategory, NutrientTotals};
use super::days::validate_date;

/// Response for log_food_entry
#[derive(Debug, Serialize)]
pub struct LogFoodEntryResponse {
    pub entry: FoodEntry,
    pub date: String,
    pub day_totals: NutrientTotals,
}

/// Parse a meal type, rejecting anything outside the four categories
pub fn parse_meal_type(meal_type: &str) -> Result<MealCategory, String> {
    meal_type.parse()
}

/// Log a food entry. Creates the day if needed.
pub fn log_food_entry(
    db: &Database,
    date: &str,
    meal_type: &str,
    name: &str,
    nutrients: NutrientTotals,
    notes: Option<String>,
) -> Result<LogFoodEntryResponse, String> {
    validate_date(date)?;
    let meal_type = parse_meal_type(meal_type)?;
    if let Err(e) = nutrients.validate() {
        tracing::warn!(date, error = %e, "Rejected food entry");
        return Err(e);
    }

    db.with_transaction(|tx| {
        let day = Day::get_or_create(tx, date)?;
        let entry = FoodEntry::create(
            tx,
            &FoodEntryCreate {
                day_id: day.id,
                meal_type,
                name: name.to_string(),
                nutrients,
                notes,
            },
        )?;
        let day = Day::get_by_id(tx, day.id)?.ok_or(DbError::NotFound("Day"))?;

        tracing::info!(date, meal = %meal_type, calories = nutrients.calories, "Logged food entry");

        Ok(LogFoodEntryResponse {
            entry,
            date: day.date,
            day_totals: day.cached_totals,
        })
    })
    .map_err(|e| format!("Failed to log food entry: {}", e))
}

/// Get a food entry by ID
pub fn get_food_entry(db: &Database, id: i64) -> Result<Option<FoodEntry>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    FoodEntry::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get food entry: {}", e))
}

/// Update a food entry
pub fn update_food_entry(
    db: &Database,
    id: i64,
    data: &FoodEntryUpdate,
) -> Result<Option<FoodEntry>, String> {
    db.with_transaction(|tx| FoodEntry::update(tx, id, data))
        .map_err(|e| format!("Failed to update food entry: {}", e))
}

/// Delete a food entry
pub fn delete_food_entry(db: &Database, id: i64) -> Result<bool, String> {
    let deleted = db
        .with_transaction(|tx| FoodEntry::delete(tx, id))
        .map_err(|e| format!("Failed to delete food entry: {}", e))?;

    if deleted {
        tracing::info!(id, "Deleted food entry");
    }
    Ok(deleted)
}
