//! Nutrilog Status Tool
//!
//! Provides runtime status information about the Nutrilog service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Diary usage instructions for AI assistants
pub const DIARY_INSTRUCTIONS: &str = r#"
# Nutrilog Food Diary Instructions

## Logging food

Call `log_food_entry` once per food with:
- `date`: ISO date (YYYY-MM-DD). The day is created automatically.
- `meal_type`: one of `breakfast`, `lunch`, `dinner`, `snack`.
- `name`: what was eaten.
- `calories` (kcal), `protein`, `fat`, `carbs` (grams): the amounts actually
  eaten, not per 100 g. Values must be zero or positive.

Fix mistakes with `update_food_entry` (only the fields you pass change) or
remove them with `delete_food_entry`.

## Targets

- `set_default_targets` sets the daily calorie and macro targets used by every day.
- `set_day_targets` overrides them for one date. Omitted values fall back to the defaults;
  calling it with no values clears the override.
- Targets must be positive. A missing target is not zero: percentages are reported
  as null and should be shown as a dash.

## Reading a day

`get_day_summary` returns entries grouped by meal, meal and day totals, and:
- `calorie_percents.day`: percent of the calorie target, rounded and capped at 100.
- `calorie_percents.by_meal`: per-meal percents. They always add up exactly to the day value;
  the last meal of the day that has food absorbs rounding differences.
- `nutrient_percents`: exact, uncapped percent of each target (use for "over target" display).
- `over_calorie_target`: true when the day is above its calorie target.

`list_days` gives a paged overview (newest first), `recalculate_day` rebuilds cached totals.
"#;

/// Runtime status of the Nutrilog service
#[derive(Debug, Clone, Serialize)]
pub struct NutrilogStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> NutrilogStatus {
        let build_info = BuildInfo::current();

        // In-memory or not yet created databases have no file
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = Pid::from_u32(std::process::id());
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        let memory_usage_bytes = sys.process(pid).map(|p| p.memory()).unwrap_or(0);

        NutrilogStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid.as_u32(),
            memory_usage_bytes,
        }
    }
}
