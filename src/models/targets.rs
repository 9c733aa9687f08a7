//! Daily nutrient targets
//!
//! A single-row table holds the default targets; days may override them.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Daily targets. `None` means no target is set for that nutrient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTargets {
    pub calories: Option<f64>, // kcal
    pub protein: Option<f64>,  // grams
    pub fat: Option<f64>,      // grams
    pub carbs: Option<f64>,    // grams
}

impl NutrientTargets {
    /// Fill unset values from `fallback`
    pub fn or(&self, fallback: &NutrientTargets) -> Self {
        Self {
            calories: self.calories.or(fallback.calories),
            protein: self.protein.or(fallback.protein),
            fat: self.fat.or(fallback.fat),
            carbs: self.carbs.or(fallback.carbs),
        }
    }

    /// Check that every set value is a finite, positive number
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbs", self.carbs),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(format!("{} target must be a positive number", field));
                }
            }
        }
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            calories: row.get("calorie_target")?,
            protein: row.get("protein_target")?,
            fat: row.get("fat_target")?,
            carbs: row.get("carbs_target")?,
        })
    }

    /// Get the default targets (all unset if never configured)
    pub fn get_default(conn: &Connection) -> DbResult<Self> {
        let mut stmt = conn.prepare("SELECT * FROM default_targets WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(targets) => Ok(targets),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the default targets (upsert)
    pub fn set_default(conn: &Connection, targets: &NutrientTargets) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO default_targets (id, calorie_target, protein_target, fat_target, carbs_target)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                calorie_target = excluded.calorie_target,
                protein_target = excluded.protein_target,
                fat_target = excluded.fat_target,
                carbs_target = excluded.carbs_target,
                updated_at = datetime('now')
            "#,
            params![targets.calories, targets.protein, targets.fat, targets.carbs],
        )?;

        Self::get_default(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_default_targets_start_unset() {
        let conn = conn();
        assert_eq!(NutrientTargets::get_default(&conn).unwrap(), NutrientTargets::default());
    }

    #[test]
    fn test_set_default_overwrites() {
        let conn = conn();
        let first = NutrientTargets {
            calories: Some(2000.0),
            protein: Some(120.0),
            ..Default::default()
        };
        NutrientTargets::set_default(&conn, &first).unwrap();

        let second = NutrientTargets {
            calories: Some(1800.0),
            ..Default::default()
        };
        let stored = NutrientTargets::set_default(&conn, &second).unwrap();

        assert_eq!(stored, second);
    }

    #[test]
    fn test_or_fills_unset_values() {
        let day = NutrientTargets {
            calories: Some(2500.0),
            ..Default::default()
        };
        let defaults = NutrientTargets {
            calories: Some(2000.0),
            fat: Some(70.0),
            ..Default::default()
        };

        let effective = day.or(&defaults);
        assert_eq!(effective.calories, Some(2500.0));
        assert_eq!(effective.fat, Some(70.0));
        assert_eq!(effective.protein, None);
    }

    #[test]
    fn test_validate() {
        assert!(NutrientTargets::default().validate().is_ok());
        assert!(NutrientTargets { calories: Some(0.0), ..Default::default() }.validate().is_err());
        assert!(NutrientTargets { carbs: Some(-10.0), ..Default::default() }.validate().is_err());
        assert!(NutrientTargets { fat: Some(f64::NAN), ..Default::default() }.validate().is_err());
    }
}
