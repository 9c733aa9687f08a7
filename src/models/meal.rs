//! Meal categories
//!
//! The closed set of meal slots and a fixed-order container holding one
//! value per slot.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Meal slot a food entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealCategory {
    /// All categories in declared order. Anything that depends on meal order
    /// iterates this array, never a map's key order.
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
            MealCategory::Snack => "snack",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            "snack" | "snacks" => Ok(MealCategory::Snack),
            other => Err(format!(
                "Unknown meal type '{}' (expected breakfast, lunch, dinner or snack)",
                other
            )),
        }
    }
}

/// One value per meal category
///
/// Serializes as an object keyed by meal name. Keys missing on input are
/// filled with `T::default()`, so a partial mapping deserializes cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerMeal<T> {
    pub breakfast: T,
    pub lunch: T,
    pub dinner: T,
    pub snack: T,
}

impl<T> PerMeal<T> {
    /// Build by calling `f` once per category, in declared order
    pub fn from_fn(mut f: impl FnMut(MealCategory) -> T) -> Self {
        Self {
            breakfast: f(MealCategory::Breakfast),
            lunch: f(MealCategory::Lunch),
            dinner: f(MealCategory::Dinner),
            snack: f(MealCategory::Snack),
        }
    }

    pub fn get(&self, meal: MealCategory) -> &T {
        match meal {
            MealCategory::Breakfast => &self.breakfast,
            MealCategory::Lunch => &self.lunch,
            MealCategory::Dinner => &self.dinner,
            MealCategory::Snack => &self.snack,
        }
    }

    pub fn get_mut(&mut self, meal: MealCategory) -> &mut T {
        match meal {
            MealCategory::Breakfast => &mut self.breakfast,
            MealCategory::Lunch => &mut self.lunch,
            MealCategory::Dinner => &mut self.dinner,
            MealCategory::Snack => &mut self.snack,
        }
    }

    /// Iterate `(category, value)` pairs in declared order
    pub fn iter(&self) -> impl Iterator<Item = (MealCategory, &T)> + '_ {
        MealCategory::ALL.into_iter().map(move |meal| (meal, self.get(meal)))
    }

    /// Apply `f` to every slot
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerMeal<U> {
        PerMeal::from_fn(|meal| f(self.get(meal)))
    }
}

impl<T> Index<MealCategory> for PerMeal<T> {
    type Output = T;

    fn index(&self, meal: MealCategory) -> &T {
        self.get(meal)
    }
}

impl<T> IndexMut<MealCategory> for PerMeal<T> {
    fn index_mut(&mut self, meal: MealCategory) -> &mut T {
        self.get_mut(meal)
    }
}
