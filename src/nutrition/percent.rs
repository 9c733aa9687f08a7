//! Percent-of-target calculation
//!
//! Converts calorie totals into integer "percent of daily target" values.
//! Meal percentages are reconciled so they always add up to the day
//! percentage even though every value is rounded on its own.

use serde::{Deserialize, Serialize};

use crate::models::{MealCategory, NutrientTargets, NutrientTotals, PerMeal};

/// Display percentages for a day and its meals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPercents {
    /// Day percentage, 0..=100
    pub day: u8,
    /// Meal percentages, summing exactly to `day`
    pub by_meal: PerMeal<u8>,
}

impl TargetPercents {
    /// Sum of the meal percentages
    pub fn meal_sum(&self) -> u32 {
        self.by_meal.iter().map(|(_, pct)| u32::from(*pct)).sum()
    }
}

/// Unrounded percent of target for each nutrient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientPercents {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
}

fn usable_target(target: Option<f64>) -> Option<f64> {
    // NaN fails the comparison as well
    target.filter(|t| *t > 0.0)
}

/// `amount / target * 100`, unrounded and unclamped
///
/// Returns `None` when there is no positive target.
pub fn percent_of_target(amount: f64, target: Option<f64>) -> Option<f64> {
    let target = usable_target(target)?;
    Some(amount / target * 100.0)
}

/// Percent of target for every nutrient that has a target
pub fn percent_of_targets(totals: &NutrientTotals, targets: &NutrientTargets) -> NutrientPercents {
    NutrientPercents {
        calories: percent_of_target(totals.calories, targets.calories),
        protein: percent_of_target(totals.protein, targets.protein),
        fat: percent_of_target(totals.fat, targets.fat),
        carbs: percent_of_target(totals.carbs, targets.carbs),
    }
}

/// Round a ratio for display: clamp to 0..=100, round half away from zero
fn display_percent(amount: f64, target: f64) -> u8 {
    let ratio = amount / target * 100.0;
    if ratio.is_nan() {
        return 0;
    }
    ratio.clamp(0.0, 100.0).round() as u8
}

/// Compute day and per-meal percentages of the calorie target
///
/// Every populated meal but the last one (in breakfast, lunch, dinner, snack
/// order) is rounded on its own; the last populated meal absorbs the
/// difference to the rounded day value. Returns `None` when there is no
/// positive target.
pub fn reconcile(meal_calories: &PerMeal<f64>, target: Option<f64>) -> Option<TargetPercents> {
    let target = usable_target(target)?;

    let day_calories: f64 = meal_calories.iter().map(|(_, calories)| *calories).sum();
    let day = display_percent(day_calories, target);
    let mut by_meal: PerMeal<u8> = PerMeal::default();

    let populated: Vec<MealCategory> = MealCategory::ALL
        .into_iter()
        .filter(|meal| meal_calories[*meal] != 0.0)
        .collect();

    let Some((&absorber, others)) = populated.split_last() else {
        return Some(TargetPercents { day, by_meal });
    };

    let mut sum_others: u32 = 0;
    for &meal in others {
        let pct = display_percent(meal_calories[meal], target);
        by_meal[meal] = pct;
        sum_others += u32::from(pct);
    }

    // Rounded shares can overshoot the day value; take the excess back from
    // the latest meals first.
    let mut excess = sum_others.saturating_sub(u32::from(day));
    for &meal in others.iter().rev() {
        if excess == 0 {
            break;
        }
        let taken = excess.min(u32::from(by_meal[meal]));
        by_meal[meal] -= taken as u8;
        excess -= taken;
        sum_others -= taken;
    }

    // sum_others <= day from here on
    by_meal[absorber] = (u32::from(day) - sum_others) as u8;

    let percents = TargetPercents { day, by_meal };
    debug_assert_eq!(percents.meal_sum(), u32::from(day));
    Some(percents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meals(breakfast: f64, lunch: f64, dinner: f64, snack: f64) -> PerMeal<f64> {
        PerMeal {
            breakfast,
            lunch,
            dinner,
            snack,
        }
    }

    #[test]
    fn test_percent_of_target_without_target() {
        assert_eq!(percent_of_target(500.0, None), None);
        assert_eq!(percent_of_target(200.0, None), None);
        assert_eq!(percent_of_target(200.0, Some(0.0)), None);
        assert_eq!(percent_of_target(200.0, Some(-100.0)), None);
        assert_eq!(percent_of_target(200.0, Some(f64::NAN)), None);
    }

    #[test]
    fn test_percent_of_target_is_unrounded() {
        assert_eq!(percent_of_target(1000.0, Some(2000.0)), Some(50.0));
        assert_eq!(percent_of_target(300.0, Some(2000.0)), Some(15.0));
        assert_eq!(percent_of_target(3000.0, Some(2000.0)), Some(150.0));
        assert_eq!(percent_of_target(1.0, Some(8.0)), Some(12.5));
    }

    #[test]
    fn test_basic_ratio() {
        let result = reconcile(&meals(300.0, 0.0, 700.0, 0.0), Some(2000.0)).unwrap();

        assert_eq!(result.day, 50);
        assert_eq!(result.by_meal.breakfast, 15);
        assert_eq!(result.by_meal.dinner, 35);
        assert_eq!(result.by_meal.lunch, 0);
        assert_eq!(result.by_meal.snack, 0);
    }

    #[test]
    fn test_last_populated_meal_absorbs_rounding() {
        let result = reconcile(&meals(333.0, 333.0, 334.0, 0.0), Some(1000.0)).unwrap();

        assert_eq!(result.day, 100);
        assert_eq!(
            result.by_meal,
            PerMeal {
                breakfast: 33,
                lunch: 33,
                dinner: 34,
                snack: 0,
            }
        );
    }

    #[test]
    fn test_absorber_is_last_not_largest() {
        // 12.6% + 12.6% + 12.6% = 37.8% -> day 38, each meal alone rounds to 13
        let result = reconcile(&meals(126.0, 126.0, 0.0, 126.0), Some(1000.0)).unwrap();

        assert_eq!(result.day, 38);
        assert_eq!(result.by_meal.breakfast, 13);
        assert_eq!(result.by_meal.lunch, 13);
        assert_eq!(result.by_meal.dinner, 0);
        assert_eq!(result.by_meal.snack, 12);
    }

    #[test]
    fn test_no_target_returns_none() {
        let calories = meals(400.0, 600.0, 800.0, 100.0);
        assert_eq!(reconcile(&calories, None), None);
        assert_eq!(reconcile(&calories, Some(0.0)), None);
        assert_eq!(reconcile(&calories, Some(-5.0)), None);
    }

    #[test]
    fn test_all_zero_meals() {
        let result = reconcile(&PerMeal::default(), Some(2000.0)).unwrap();

        assert_eq!(result.day, 0);
        assert_eq!(result.by_meal, PerMeal::default());
    }

    #[test]
    fn test_single_meal_takes_day_value() {
        let result = reconcile(&meals(0.0, 0.0, 0.0, 149.0), Some(1000.0)).unwrap();

        assert_eq!(result.day, 15);
        assert_eq!(result.by_meal.snack, 15);
        assert_eq!(result.meal_sum(), 15);
    }

    #[test]
    fn test_day_is_clamped_when_over_target() {
        let result = reconcile(&meals(1500.0, 0.0, 1500.0, 0.0), Some(2000.0)).unwrap();

        assert_eq!(result.day, 100);
        assert_eq!(result.by_meal.breakfast, 75);
        assert_eq!(result.by_meal.dinner, 25);
    }

    #[test]
    fn test_overshoot_is_taken_back_from_latest_meal() {
        // Breakfast and lunch alone round to 80 each while the day clamps to 100
        let result = reconcile(&meals(800.0, 800.0, 100.0, 0.0), Some(1000.0)).unwrap();

        assert_eq!(result.day, 100);
        assert_eq!(result.by_meal.breakfast, 80);
        assert_eq!(result.by_meal.lunch, 20);
        assert_eq!(result.by_meal.dinner, 0);
        assert_eq!(result.meal_sum(), 100);
    }

    #[test]
    fn test_overshoot_from_half_rounding() {
        // 0.5% + 0.5% + 0.01% rounds to 1 + 1 independently but 1 for the day
        let result = reconcile(&meals(5.0, 5.0, 0.1, 0.0), Some(1000.0)).unwrap();

        assert_eq!(result.day, 1);
        assert_eq!(result.by_meal.breakfast, 1);
        assert_eq!(result.by_meal.lunch, 0);
        assert_eq!(result.by_meal.dinner, 0);
    }

    #[test]
    fn test_non_finite_calories_keep_sum() {
        let result = reconcile(&meals(f64::NAN, 200.0, 0.0, 300.0), Some(1000.0)).unwrap();
        assert_eq!(result.day, 0);
        assert_eq!(result.meal_sum(), 0);

        let result = reconcile(&meals(100.0, f64::INFINITY, 0.0, 0.0), Some(1000.0)).unwrap();
        assert_eq!(result.day, 100);
        assert_eq!(result.meal_sum(), 100);
    }

    #[test]
    fn test_meal_sum_always_equals_day() {
        let samples = [0.0, 0.4, 4.9, 5.0, 5.1, 14.9, 45.0, 126.0, 333.0, 334.0, 499.5, 999.0, 1750.0, 4000.0];
        let targets = [1.0, 10.0, 999.0, 1000.0, 1850.0, 2000.0, 3333.0];

        for &target in &targets {
            for &b in &samples {
                for &l in &samples {
                    for &d in &samples {
                        for &s in &samples {
                            let result = reconcile(&meals(b, l, d, s), Some(target)).unwrap();
                            assert!(result.day <= 100);
                            assert_eq!(
                                result.meal_sum(),
                                u32::from(result.day),
                                "meals {:?} target {}",
                                (b, l, d, s),
                                target
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_percent_of_targets_skips_unset() {
        let totals = NutrientTotals::new(1000.0, 60.0, 35.0, 120.0);
        let targets = NutrientTargets {
            calories: Some(2000.0),
            protein: Some(120.0),
            fat: None,
            carbs: Some(0.0),
        };

        let percents = percent_of_targets(&totals, &targets);

        assert_eq!(percents.calories, Some(50.0));
        assert_eq!(percents.protein, Some(50.0));
        assert_eq!(percents.fat, None);
        assert_eq!(percents.carbs, None);
    }
}
