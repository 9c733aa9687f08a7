//! Day model
//!
//! Represents a diary day with cached nutrient totals and target overrides.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::{NutrientTargets, NutrientTotals};

/// A day container for food entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    pub id: i64,
    pub date: String,  // ISO date: "2025-01-09"
    /// Per-day overrides; unset values fall back to the default targets
    pub targets: NutrientTargets,
    pub cached_totals: NutrientTotals,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Day {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            targets: NutrientTargets {
                calories: row.get("calorie_target")?,
                protein: row.get("protein_target")?,
                fat: row.get("fat_target")?,
                carbs: row.get("carbs_target")?,
            },
            cached_totals: NutrientTotals {
                calories: row.get("cached_calories")?,
                protein: row.get("cached_protein")?,
                fat: row.get("cached_fat")?,
                carbs: row.get("cached_carbs")?,
            },
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Create a new day
    pub fn create(conn: &Connection, date: &str, notes: Option<&str>) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO days (date, notes) VALUES (?1, ?2)",
            params![date, notes],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound("Day"))
    }

    /// Get a day by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a day by date
    pub fn get_by_date(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days WHERE date = ?1")?;

        let result = stmt.query_row([date], Self::from_row);
        match result {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get or create a day by date
    pub fn get_or_create(conn: &Connection, date: &str) -> DbResult<Self> {
        if let Some(day) = Self::get_by_date(conn, date)? {
            return Ok(day);
        }

        Self::create(conn, date, None)
    }

    /// List days with optional date range, newest first
    pub fn list(
        conn: &Connection,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let mut sql = String::from("SELECT * FROM days WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY date DESC");

        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));

        params_vec.push(Box::new(offset));
        sql.push_str(&format!(" OFFSET ?{}", params_vec.len()));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let days = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }

    /// List every day, oldest first
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days ORDER BY date ASC")?;

        let days = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }

    /// Count days with optional date range
    pub fn count(conn: &Connection, start_date: Option<&str>, end_date: Option<&str>) -> DbResult<i64> {
        let mut sql = String::from("SELECT COUNT(*) FROM days WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let count: i64 = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
        Ok(count)
    }

    /// Replace the day's notes
    pub fn update_notes(conn: &Connection, id: i64, notes: Option<&str>) -> DbResult<Option<Self>> {
        conn.execute(
            "UPDATE days SET notes = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![notes, id],
        )?;

        Self::get_by_id(conn, id)
    }

    /// Replace the day's target overrides
    pub fn set_targets(conn: &Connection, id: i64, targets: &NutrientTargets) -> DbResult<Option<Self>> {
        conn.execute(
            r#"
            UPDATE days SET
                calorie_target = ?1,
                protein_target = ?2,
                fat_target = ?3,
                carbs_target = ?4,
                updated_at = datetime('now')
            WHERE id = ?5
            "#,
            params![targets.calories, targets.protein, targets.fat, targets.carbs, id],
        )?;

        Self::get_by_id(conn, id)
    }

    /// Targets in effect for this day: overrides first, then the defaults
    pub fn effective_targets(&self, defaults: &NutrientTargets) -> NutrientTargets {
        self.targets.or(defaults)
    }

    /// Update cached totals for a day
    pub fn update_cached_totals(conn: &Connection, id: i64, totals: &NutrientTotals) -> DbResult<()> {
        conn.execute(
            r#"
            UPDATE days SET
                cached_calories = ?1,
                cached_protein = ?2,
                cached_fat = ?3,
                cached_carbs = ?4,
                updated_at = datetime('now')
            WHERE id = ?5
            "#,
            params![totals.calories, totals.protein, totals.fat, totals.carbs, id],
        )?;
        Ok(())
    }

    /// Delete a day (its entries cascade)
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM days WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
