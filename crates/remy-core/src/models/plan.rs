// ABOUTME: Weekly meal plan and recipe response shapes returned by the engine
// ABOUTME: Defines WeeklyMealPlan, DayPlan, PlannedMeal, MealSlot, ServingMode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use serde::{Deserialize, Serialize};

use super::recipe::{LibraryRecipe, MealType};

/// Whether a slot was served from the library or freshly generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingMode {
    /// Served from the shared library
    Reuse,
    /// Produced by the external generation service
    Generate,
}

/// One of the three planned meal slots in a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Morning slot
    Breakfast,
    /// Midday slot
    Lunch,
    /// Evening slot
    Dinner,
}

impl MealSlot {
    /// All slots in planning order
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Meal type queried from the library for this slot
    #[must_use]
    pub const fn meal_type(&self) -> MealType {
        match self {
            Self::Breakfast => MealType::Breakfast,
            Self::Lunch => MealType::Lunch,
            Self::Dinner => MealType::Dinner,
        }
    }
}

/// A recipe selected for a single request, with its match quality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedRecipe {
    /// The selected recipe
    pub recipe: LibraryRecipe,
    /// Rounded composite score in 0-100; absent for fresh generations
    pub match_score: Option<u8>,
}

/// Response for a single-slot recipe request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// How the recipes were produced
    pub mode: ServingMode,
    /// Selected recipes, best first
    pub recipes: Vec<SuggestedRecipe>,
}

/// A meal committed to a weekly plan slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    /// The committed recipe
    pub recipe: LibraryRecipe,
    /// Rounded composite score in 0-100; absent for fresh generations
    pub match_score: Option<u8>,
    /// How this slot was filled
    pub mode: ServingMode,
}

/// One day of a weekly plan; unsatisfiable slots stay empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day label ("Monday" .. "Sunday")
    pub day: String,
    /// Breakfast slot, if satisfiable
    pub breakfast: Option<PlannedMeal>,
    /// Lunch slot, if satisfiable
    pub lunch: Option<PlannedMeal>,
    /// Dinner slot, if satisfiable
    pub dinner: Option<PlannedMeal>,
}

impl DayPlan {
    /// Create an empty day
    #[must_use]
    pub fn empty(day: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    /// Fill one slot
    pub fn set_slot(&mut self, slot: MealSlot, meal: Option<PlannedMeal>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = meal,
            MealSlot::Lunch => self.lunch = meal,
            MealSlot::Dinner => self.dinner = meal,
        }
    }

    /// Read one slot
    #[must_use]
    pub const fn slot(&self, slot: MealSlot) -> Option<&PlannedMeal> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }
}

/// A full seven-day plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyMealPlan {
    /// Seven days, Monday first
    pub days: Vec<DayPlan>,
}

impl WeeklyMealPlan {
    /// Day labels in planning order
    pub const DAY_NAMES: [&'static str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    /// Count of filled slots across the week
    #[must_use]
    pub fn filled_slots(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| MealSlot::ALL.iter().map(|s| d.slot(*s)))
            .filter(Option::is_some)
            .count()
    }
}
