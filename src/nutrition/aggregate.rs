//! Meal and day aggregation
//!
//! Sums entry macros into per-meal and per-day totals. Pure functions: no
//! validation, no I/O. Non-finite input values propagate into the sums.

use serde::{Deserialize, Serialize};

use crate::models::{MealCategory, NutrientSource, NutrientTotals, PerMeal};

/// Per-meal and per-day totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub meal_totals: PerMeal<NutrientTotals>,
    pub day_totals: NutrientTotals,
}

impl DayAggregate {
    /// Calories of each meal, the input of the percent reconciler
    pub fn meal_calories(&self) -> PerMeal<f64> {
        self.meal_totals.map(|totals| totals.calories)
    }
}

/// Coordinate-wise sum of a list of entries
pub fn sum_entries<E: NutrientSource>(entries: &[E]) -> NutrientTotals {
    entries.iter().map(NutrientSource::nutrients).sum()
}

/// Aggregate entries grouped by meal into meal and day totals
///
/// Empty meals yield zero totals. The day total is the sum of the four meal
/// totals, so it always agrees with them.
pub fn aggregate<E: NutrientSource>(entries_by_meal: &PerMeal<Vec<E>>) -> DayAggregate {
    let meal_totals = entries_by_meal.map(|entries| sum_entries(entries));
    let day_totals = meal_totals.iter().map(|(_, totals)| *totals).sum();

    DayAggregate {
        meal_totals,
        day_totals,
    }
}

/// Bucket entries by meal, keeping their relative order within each meal
pub fn group_by_meal<E>(
    entries: impl IntoIterator<Item = E>,
    meal_of: impl Fn(&E) -> MealCategory,
) -> PerMeal<Vec<E>> {
    let mut grouped: PerMeal<Vec<E>> = PerMeal::from_fn(|_| Vec::new());
    for entry in entries {
        let meal = meal_of(&entry);
        grouped[meal].push(entry);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(calories: f64, protein: f64, fat: f64, carbs: f64) -> NutrientTotals {
        NutrientTotals::new(calories, protein, fat, carbs)
    }

    #[test]
    fn test_empty_day_is_all_zero() {
        let empty: PerMeal<Vec<NutrientTotals>> = PerMeal::default();
        let result = aggregate(&empty);

        assert_eq!(result.day_totals, NutrientTotals::zero());
        for meal in MealCategory::ALL {
            assert_eq!(result.meal_totals[meal], NutrientTotals::zero());
        }
    }

    #[test]
    fn test_sums_meals_and_day() {
        let mut entries: PerMeal<Vec<NutrientTotals>> = PerMeal::default();
        entries.breakfast.push(totals(300.0, 10.0, 20.0, 30.0));
        entries.dinner.push(totals(700.0, 40.0, 30.0, 20.0));

        let result = aggregate(&entries);

        assert_eq!(result.day_totals.calories, 1000.0);
        assert_eq!(result.meal_totals.breakfast.calories, 300.0);
        assert_eq!(result.meal_totals.dinner.calories, 700.0);
        assert_eq!(result.meal_totals.lunch, NutrientTotals::zero());
        assert_eq!(result.meal_totals.snack, NutrientTotals::zero());
        assert_eq!(result.day_totals, totals(1000.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn test_multiple_entries_in_one_meal() {
        let mut entries: PerMeal<Vec<NutrientTotals>> = PerMeal::default();
        entries.snack = vec![
            totals(120.0, 3.0, 5.0, 15.0),
            totals(80.0, 1.0, 0.5, 20.0),
            totals(0.0, 0.0, 0.0, 0.0),
        ];

        let result = aggregate(&entries);

        assert_eq!(result.meal_totals.snack, totals(200.0, 4.0, 5.5, 35.0));
        assert_eq!(result.day_totals, result.meal_totals.snack);
    }

    #[test]
    fn test_entry_order_does_not_matter() {
        let a = totals(250.0, 12.0, 8.0, 30.0);
        let b = totals(410.0, 22.0, 18.0, 41.0);

        let mut forward: PerMeal<Vec<NutrientTotals>> = PerMeal::default();
        forward.lunch = vec![a, b];
        let mut backward: PerMeal<Vec<NutrientTotals>> = PerMeal::default();
        backward.lunch = vec![b, a];

        assert_eq!(aggregate(&forward), aggregate(&backward));
    }

    #[test]
    fn test_missing_meals_from_json_are_empty() {
        let entries: PerMeal<Vec<NutrientTotals>> = serde_json::from_str(
            r#"{"lunch": [{"calories": 500, "protein": 25, "fat": 10, "carbs": 60}]}"#,
        )
        .unwrap();

        let result = aggregate(&entries);

        assert_eq!(result.meal_totals.lunch.calories, 500.0);
        assert_eq!(result.day_totals.calories, 500.0);
        assert_eq!(result.meal_totals.breakfast, NutrientTotals::zero());
    }

    #[test]
    fn test_nan_propagates() {
        let mut entries: PerMeal<Vec<NutrientTotals>> = PerMeal::default();
        entries.breakfast.push(totals(f64::NAN, 1.0, 1.0, 1.0));
        entries.lunch.push(totals(100.0, 1.0, 1.0, 1.0));

        let result = aggregate(&entries);

        assert!(result.meal_totals.breakfast.calories.is_nan());
        assert!(result.day_totals.calories.is_nan());
        assert_eq!(result.meal_totals.lunch.calories, 100.0);
        assert_eq!(result.day_totals.protein, 2.0);
    }

    #[test]
    fn test_group_by_meal_keeps_order() {
        let entries = vec![
            (MealCategory::Dinner, 1),
            (MealCategory::Breakfast, 2),
            (MealCategory::Dinner, 3),
        ];

        let grouped = group_by_meal(entries, |(meal, _)| *meal);

        assert_eq!(grouped.breakfast, vec![(MealCategory::Breakfast, 2)]);
        assert_eq!(
            grouped.dinner,
            vec![(MealCategory::Dinner, 1), (MealCategory::Dinner, 3)]
        );
        assert!(grouped.lunch.is_empty());
        assert!(grouped.snack.is_empty());
    }
}
