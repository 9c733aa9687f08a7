//! Target MCP Tools
//!
//! Default daily targets used by every day without its own overrides.

use crate::db::Database;
use crate::models::NutrientTargets;

/// Get the default daily targets
pub fn get_default_targets(db: &Database) -> Result<NutrientTargets, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    NutrientTargets::get_default(&conn)
        .map_err(|e| format!("Failed to get default targets: {}", e))
}

/// Replace the default daily targets
pub fn set_default_targets(db: &Database, targets: NutrientTargets) -> Result<NutrientTargets, String> {
    targets.validate()?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let stored = NutrientTargets::set_default(&conn, &targets)
        .map_err(|e| format!("Failed to set default targets: {}", e))?;
    tracing::info!(calorie_target = ?stored.calories, "Set default targets");

    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_set_and_get_default_targets() {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();

        assert_eq!(get_default_targets(&db).unwrap(), NutrientTargets::default());

        let targets = NutrientTargets {
            calories: Some(2200.0),
            protein: Some(140.0),
            fat: Some(70.0),
            carbs: Some(250.0),
        };
        assert_eq!(set_default_targets(&db, targets).unwrap(), targets);
        assert_eq!(get_default_targets(&db).unwrap(), targets);
    }

    #[test]
    fn test_set_default_targets_rejects_negative() {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();

        let result = set_default_targets(
            &db,
            NutrientTargets {
                calories: Some(-5.0),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
