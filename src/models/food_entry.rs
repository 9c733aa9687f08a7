//! Food Entry model
//!
//! A logged food record, already normalized to macros and assigned to a meal.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{aggregate, group_by_meal, DayAggregate};
use super::{Day, MealCategory, NutrientSource, NutrientTotals, PerMeal};

/// A food entry representing consumed food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: i64,
    pub day_id: i64,
    pub meal_type: MealCategory,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryCreate {
    pub day_id: i64,
    pub meal_type: MealCategory,
    pub name: String,
    pub nutrients: NutrientTotals,
    pub notes: Option<String>,
}

/// Data for updating a food entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodEntryUpdate {
    pub meal_type: Option<MealCategory>,
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub notes: Option<String>,
}

impl NutrientSource for FoodEntry {
    fn nutrients(&self) -> NutrientTotals {
        NutrientTotals::new(self.calories, self.protein, self.fat, self.carbs)
    }
}

fn meal_type_from_row(row: &Row) -> rusqlite::Result<MealCategory> {
    let idx = row.as_ref().column_index("meal_type")?;
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn validate_name(name: &str) -> DbResult<()> {
    if name.trim().is_empty() {
        return Err(DbError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

impl FoodEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            day_id: row.get("day_id")?,
            meal_type: meal_type_from_row(row)?,
            name: row.get("name")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            fat: row.get("fat")?,
            carbs: row.get("carbs")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Create a new food entry and refresh the day's cached totals
    pub fn create(conn: &Connection, data: &FoodEntryCreate) -> DbResult<Self> {
        validate_name(&data.name)?;
        data.nutrients.validate().map_err(DbError::Validation)?;

        conn.execute(
            r#"
            INSERT INTO food_entries (day_id, meal_type, name, calories, protein, fat, carbs, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                data.day_id,
                data.meal_type.as_str(),
                data.name.trim(),
                data.nutrients.calories,
                data.nutrients.protein,
                data.nutrients.fat,
                data.nutrients.carbs,
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let entry = Self::get_by_id(conn, id)?.ok_or(DbError::NotFound("Food entry"))?;

        recalculate_day_totals(conn, data.day_id)?;

        Ok(entry)
    }

    /// Get a food entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_entries WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all food entries for a day in logging order
    pub fn list_for_day(conn: &Connection, day_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_entries WHERE day_id = ?1 ORDER BY id")?;

        let entries = stmt
            .query_map([day_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get a day's food entries grouped by meal
    pub fn by_meal_for_day(conn: &Connection, day_id: i64) -> DbResult<PerMeal<Vec<Self>>> {
        let entries = Self::list_for_day(conn, day_id)?;
        Ok(group_by_meal(entries, |entry| entry.meal_type))
    }

    /// Count the food entries of a day
    pub fn count_for_day(conn: &Connection, day_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM food_entries WHERE day_id = ?1",
            [day_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Update a food entry and refresh the day's cached totals
    pub fn update(conn: &Connection, id: i64, data: &FoodEntryUpdate) -> DbResult<Option<Self>> {
        let Some(entry) = Self::get_by_id(conn, id)? else {
            return Ok(None);
        };

        if let Some(ref name) = data.name {
            validate_name(name)?;
        }
        let merged = NutrientTotals::new(
            data.calories.unwrap_or(entry.calories),
            data.protein.unwrap_or(entry.protein),
            data.fat.unwrap_or(entry.fat),
            data.carbs.unwrap_or(entry.carbs),
        );
        merged.validate().map_err(DbError::Validation)?;

        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(meal_type) = data.meal_type {
            updates.push(format!("meal_type = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(meal_type.as_str()));
        }
        if let Some(ref name) = data.name {
            updates.push(format!("name = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(name.trim().to_string()));
        }
        for (column, value) in [
            ("calories", data.calories),
            ("protein", data.protein),
            ("fat", data.fat),
            ("carbs", data.carbs),
        ] {
            if let Some(value) = value {
                updates.push(format!("{} = ?{}", column, params_vec.len() + 1));
                params_vec.push(Box::new(value));
            }
        }
        if let Some(ref notes) = data.notes {
            updates.push(format!("notes = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(notes.clone()));
        }

        if updates.is_empty() {
            return Ok(Some(entry));
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE food_entries SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );
        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        recalculate_day_totals(conn, entry.day_id)?;

        Self::get_by_id(conn, id)
    }

    /// Delete a food entry and refresh the day's cached totals
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let Some(entry) = Self::get_by_id(conn, id)? else {
            return Ok(false);
        };

        let rows = conn.execute("DELETE FROM food_entries WHERE id = ?1", [id])?;
        if rows > 0 {
            recalculate_day_totals(conn, entry.day_id)?;
        }

        Ok(rows > 0)
    }
}

/// Re-aggregate a day's entries and store the day total in the day's cache
pub fn recalculate_day_totals(conn: &Connection, day_id: i64) -> DbResult<DayAggregate> {
    let entries = FoodEntry::by_meal_for_day(conn, day_id)?;
    let totals = aggregate(&entries);

    Day::update_cached_totals(conn, day_id, &totals.day_totals)?;
    tracing::debug!(day_id, calories = totals.day_totals.calories, "Recalculated day totals");

    Ok(totals)
}
