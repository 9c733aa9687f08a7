//! Nutrition calculation module
//!
//! Aggregates entry macros into meal and day totals and turns those totals
//! into percent-of-target values.

pub mod aggregate;
pub mod percent;

pub use aggregate::{aggregate, group_by_meal, sum_entries, DayAggregate};
pub use percent::{
    percent_of_target, percent_of_targets, reconcile, NutrientPercents, TargetPercents,
};
