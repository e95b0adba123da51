// ABOUTME: Library recipe records, insertion drafts, and ingredient types
// ABOUTME: Defines LibraryRecipe, RecipeDraft, RecipeIngredient, MealType, Provenance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meal type a recipe is intended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    #[default]
    Dinner,
    /// Between-meal snack
    Snack,
}

impl MealType {
    /// Human-readable label for prompt building and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

/// How a recipe entered the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Produced by the external generation service
    #[default]
    Generated,
    /// Hand-curated by the content team
    Curated,
    /// Submitted by a user
    UserSubmitted,
}

/// Single ingredient line in a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Human-readable ingredient name
    pub name: String,
    /// Free-form amount ("2 cups", "300g"), if specified
    pub amount: Option<String>,
}

impl RecipeIngredient {
    /// Create an ingredient with an amount
    #[must_use]
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: Some(amount.into()),
        }
    }

    /// Create an ingredient with no amount
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
        }
    }
}

/// A recipe stored in the shared library
///
/// Immutable by default: created on first generation or curation, mutated
/// only through the store's usage/feedback counters, never hard-deleted by
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryRecipe {
    /// Unique library identifier
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Ordered ingredient list
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Sorted, normalized, pipe-joined ingredient names (dedup fingerprint)
    pub signature: String,
    /// Cuisine label, if known
    pub cuisine: Option<String>,
    /// Meal type this recipe serves
    pub meal_type: MealType,
    /// Diet tags ("vegetarian", "gluten_free", ...)
    pub diet_tags: Vec<String>,
    /// Allergens present in the recipe
    pub allergens: Vec<String>,
    /// Preparation time in minutes
    pub prep_time_mins: u32,
    /// Cooking time in minutes
    pub cook_time_mins: u32,
    /// Number of servings
    pub servings: u32,
    /// Calories per serving, if known
    pub calories: Option<u32>,
    /// How this recipe entered the library
    pub provenance: Provenance,
    /// Stored base quality in [0,1], if assessed
    pub quality_score: Option<f64>,
    /// Times this recipe was served from the library
    pub usage_count: u64,
    /// Times a user saved this recipe
    pub save_count: u64,
    /// Thumbs-up count
    pub thumbs_up: u64,
    /// Thumbs-down count
    pub thumbs_down: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl LibraryRecipe {
    /// Create a new recipe with the minimum required fields
    #[must_use]
    pub fn new(title: impl Into<String>, meal_type: MealType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            signature: String::new(),
            cuisine: None,
            meal_type,
            diet_tags: Vec::new(),
            allergens: Vec::new(),
            prep_time_mins: 0,
            cook_time_mins: 0,
            servings: 2,
            calories: None,
            provenance: Provenance::Curated,
            quality_score: None,
            usage_count: 0,
            save_count: 0,
            thumbs_up: 0,
            thumbs_down: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a description
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set the cuisine label
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Add an ingredient
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: RecipeIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Add multiple ingredients
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<RecipeIngredient>) -> Self {
        self.ingredients.extend(ingredients);
        self
    }

    /// Add an instruction step
    #[must_use]
    pub fn with_instruction(mut self, step: impl Into<String>) -> Self {
        self.instructions.push(step.into());
        self
    }

    /// Set prep and cook times
    #[must_use]
    pub const fn with_times(mut self, prep_mins: u32, cook_mins: u32) -> Self {
        self.prep_time_mins = prep_mins;
        self.cook_time_mins = cook_mins;
        self
    }

    /// Set the serving count
    #[must_use]
    pub const fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Set calories per serving
    #[must_use]
    pub const fn with_calories(mut self, calories: u32) -> Self {
        self.calories = Some(calories);
        self
    }

    /// Add a diet tag
    #[must_use]
    pub fn with_diet_tag(mut self, tag: impl Into<String>) -> Self {
        self.diet_tags.push(tag.into());
        self
    }

    /// Set the provenance
    #[must_use]
    pub const fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Set the stored base quality score
    #[must_use]
    pub const fn with_quality_score(mut self, score: f64) -> Self {
        self.quality_score = Some(score);
        self
    }

    /// Set the ingredient signature
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Raw (un-normalized) ingredient names, in order
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.name.as_str())
    }

    /// Total time (prep + cook), saturating
    #[must_use]
    pub const fn total_time_mins(&self) -> u32 {
        self.prep_time_mins.saturating_add(self.cook_time_mins)
    }

    /// Ingredient and instruction text joined for keyword scanning
    #[must_use]
    pub fn ingredient_text(&self) -> String {
        self.ingredients
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Instruction text joined for keyword scanning
    #[must_use]
    pub fn instruction_text(&self) -> String {
        self.instructions.join(" ")
    }
}

/// A validated recipe awaiting library insertion
///
/// Loose JSON from the generation service is converted into this strict
/// shape at the orchestrator boundary; anything that fails validation is a
/// generation failure, never a loosely-typed value flowing into scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Recipe title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered ingredient list
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Cuisine label
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Meal type
    #[serde(default)]
    pub meal_type: MealType,
    /// Diet tags
    #[serde(default)]
    pub diet_tags: Vec<String>,
    /// Allergens
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time_mins: u32,
    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time_mins: u32,
    /// Number of servings
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Calories per serving
    #[serde(default)]
    pub calories: Option<u32>,
    /// Sorted, normalized, pipe-joined ingredient names
    #[serde(default)]
    pub signature: String,
}

const fn default_servings() -> u32 {
    2
}

impl RecipeDraft {
    /// Build the persisted library record for this draft
    #[must_use]
    pub fn into_recipe(self, id: Uuid, provenance: Provenance) -> LibraryRecipe {
        let now = Utc::now();
        LibraryRecipe {
            id,
            title: self.title,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            signature: self.signature,
            cuisine: self.cuisine,
            meal_type: self.meal_type,
            diet_tags: self.diet_tags,
            allergens: self.allergens,
            prep_time_mins: self.prep_time_mins,
            cook_time_mins: self.cook_time_mins,
            servings: self.servings,
            calories: self.calories,
            provenance,
            quality_score: None,
            usage_count: 0,
            save_count: 0,
            thumbs_up: 0,
            thumbs_down: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
