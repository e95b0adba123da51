// ABOUTME: Read-only user context and per-request recipe preferences
// ABOUTME: Defines UserContext and RecipePreferences constraint shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recipe::MealType;

/// Read-only user context supplied with each request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// User identifier; required for taste similarity and novelty scoring
    pub user_id: Option<Uuid>,
    /// Preferred cuisines ("italian", "mexican", ...)
    pub cuisine_preferences: Vec<String>,
    /// Dietary restrictions ("vegetarian", "gluten_free", ...)
    pub dietary_restrictions: Vec<String>,
    /// Allergies to exclude
    pub allergies: Vec<String>,
    /// Number of people in the household
    pub household_size: Option<u32>,
    /// Maximum acceptable total cooking time in minutes
    pub max_cooking_minutes: Option<u32>,
}

impl UserContext {
    /// Context for a known user with otherwise default preferences
    #[must_use]
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}

/// Per-request overrides for recipe selection and generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipePreferences {
    /// Desired servings
    pub servings: Option<u32>,
    /// Maximum total time in minutes for this request
    pub max_minutes: Option<u32>,
    /// Requested meal type
    pub meal_type: Option<MealType>,
    /// Free-text cravings ("something spicy")
    pub cravings: Option<String>,
    /// Single ingredient the recipe must include
    pub must_include: Option<String>,
}

impl RecipePreferences {
    /// Preferences constrained to a meal type only
    #[must_use]
    pub fn for_meal(meal_type: MealType) -> Self {
        Self {
            meal_type: Some(meal_type),
            ..Self::default()
        }
    }
}
