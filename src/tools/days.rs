//! Day MCP Tools
//!
//! Day summaries with meal totals and percent-of-target values.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{Database, DbError, DbResult};
use crate::models::{recalculate_day_totals, Day, FoodEntry, NutrientTargets, PerMeal};
use crate::nutrition::{
    aggregate, percent_of_target, percent_of_targets, reconcile, DayAggregate, NutrientPercents,
    TargetPercents,
};

/// Full day view
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub id: i64,
    pub date: String,
    pub meals: PerMeal<Vec<FoodEntry>>,
    pub totals: DayAggregate,
    /// Targets in effect (day overrides, then defaults)
    pub targets: NutrientTargets,
    /// Rounded calorie percentages; null when there is no calorie target
    pub calorie_percents: Option<TargetPercents>,
    /// Unrounded, unclamped percent of each nutrient target
    pub nutrient_percents: NutrientPercents,
    pub over_calorie_target: bool,
    pub notes: Option<String>,
}

/// Day summary for listing
#[derive(Debug, Serialize)]
pub struct DayListItem {
    pub id: i64,
    pub date: String,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_carbs: f64,
    pub calorie_target: Option<f64>,
    pub calorie_percent: Option<u8>,
    pub entry_count: i64,
}

/// Response for list_days
#[derive(Debug, Serialize)]
pub struct ListDaysResponse {
    pub days: Vec<DayListItem>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for recalculate_day
#[derive(Debug, Serialize)]
pub struct RecalculateDayResponse {
    pub day_id: i64,
    pub date: String,
    pub totals: DayAggregate,
}

/// Reject anything that is not a real `YYYY-MM-DD` date
pub fn validate_date(date: &str) -> Result<(), String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", date))
}

/// Build the full summary of a day from the store
pub fn build_summary(conn: &Connection, day: Day) -> DbResult<DaySummaryResponse> {
    let meals = FoodEntry::by_meal_for_day(conn, day.id)?;
    let defaults = NutrientTargets::get_default(conn)?;

    let totals = aggregate(&meals);
    let targets = day.effective_targets(&defaults);
    let calorie_percents = reconcile(&totals.meal_calories(), targets.calories);
    let nutrient_percents = percent_of_targets(&totals.day_totals, &targets);
    let over_calorie_target = nutrient_percents.calories.is_some_and(|pct| pct > 100.0);

    Ok(DaySummaryResponse {
        id: day.id,
        date: day.date,
        meals,
        totals,
        targets,
        calorie_percents,
        nutrient_percents,
        over_calorie_target,
        notes: day.notes,
    })
}

// ============================================================================
// Day Tools
// ============================================================================

/// Get a day with meals, totals and target percentages
pub fn get_day_summary(db: &Database, date: &str) -> Result<Option<DaySummaryResponse>, String> {
    validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?;

    match day {
        Some(day) => build_summary(&conn, day)
            .map(Some)
            .map_err(|e| format!("Failed to summarize day: {}", e)),
        None => Ok(None),
    }
}

/// List days with optional date range
pub fn list_days(
    db: &Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListDaysResponse, String> {
    if let Some(start) = start_date {
        validate_date(start)?;
    }
    if let Some(end) = end_date {
        validate_date(end)?;
    }
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let days = Day::list(&conn, start_date, end_date, limit, offset)
        .map_err(|e| format!("Failed to list days: {}", e))?;

    let total = Day::count(&conn, start_date, end_date)
        .map_err(|e| format!("Failed to count days: {}", e))?;

    let defaults = NutrientTargets::get_default(&conn)
        .map_err(|e| format!("Failed to get default targets: {}", e))?;

    let mut items = Vec::new();
    for day in days {
        let entry_count = FoodEntry::count_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to count food entries: {}", e))?;
        let calorie_target = day.effective_targets(&defaults).calories;
        let calorie_percent = percent_of_target(day.cached_totals.calories, calorie_target)
            .map(|pct| pct.clamp(0.0, 100.0).round() as u8);

        items.push(DayListItem {
            id: day.id,
            date: day.date,
            total_calories: day.cached_totals.calories,
            total_protein: day.cached_totals.protein,
            total_fat: day.cached_totals.fat,
            total_carbs: day.cached_totals.carbs,
            calorie_target,
            calorie_percent,
            entry_count,
        });
    }

    Ok(ListDaysResponse {
        days: items,
        total,
        limit,
        offset,
    })
}

/// Update day notes
pub fn update_day_notes(
    db: &Database,
    date: &str,
    notes: Option<String>,
) -> Result<Option<DaySummaryResponse>, String> {
    validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(day) = Day::get_by_date(&conn, date).map_err(|e| format!("Failed to get day: {}", e))? else {
        return Ok(None);
    };

    let day = Day::update_notes(&conn, day.id, notes.as_deref())
        .map_err(|e| format!("Failed to update day: {}", e))?
        .ok_or_else(|| format!("Day not found: {}", date))?;

    build_summary(&conn, day)
        .map(Some)
        .map_err(|e| format!("Failed to summarize day: {}", e))
}

/// Set (or clear, with all values unset) the target overrides of a day
pub fn set_day_targets(
    db: &Database,
    date: &str,
    targets: NutrientTargets,
) -> Result<DaySummaryResponse, String> {
    validate_date(date)?;
    targets.validate()?;

    db.with_transaction(|tx| {
        let day = Day::get_or_create(tx, date)?;
        let day = Day::set_targets(tx, day.id, &targets)?
            .ok_or(DbError::NotFound("Day"))?;
        tracing::info!(date, calorie_target = ?targets.calories, "Set day targets");
        build_summary(tx, day)
    })
    .map_err(|e| format!("Failed to set day targets: {}", e))
}

/// Delete a day. Days with food entries are only deleted (with their
/// entries) when `force` is set.
pub fn delete_day(db: &Database, date: &str, force: bool) -> Result<bool, String> {
    validate_date(date)?;

    db.with_transaction(|tx| {
        let Some(day) = Day::get_by_date(tx, date)? else {
            return Ok(false);
        };
        let entry_count = FoodEntry::count_for_day(tx, day.id)?;
        if entry_count > 0 && !force {
            return Err(DbError::Validation(format!(
                "day {} has {} food entries; pass force to delete them too",
                date, entry_count
            )));
        }
        let deleted = Day::delete(tx, day.id)?;
        tracing::info!(date, entry_count, "Deleted day");
        Ok(deleted)
    })
    .map_err(|e| format!("Failed to delete day: {}", e))
}

/// Force recalculate cached totals for a day
pub fn recalculate_day(db: &Database, date: &str) -> Result<RecalculateDayResponse, String> {
    validate_date(date)?;

    db.with_transaction(|tx| {
        let day = Day::get_by_date(tx, date)?.ok_or(DbError::NotFound("Day"))?;
        let totals = recalculate_day_totals(tx, day.id)?;
        Ok(RecalculateDayResponse {
            day_id: day.id,
            date: day.date,
            totals,
        })
    })
    .map_err(|e| format!("Failed to recalculate day {}: {}", date, e))
}
