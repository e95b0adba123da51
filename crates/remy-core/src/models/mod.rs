// ABOUTME: Core domain models for the Remy meal-plan engine
// ABOUTME: Re-exports recipe, inventory, user, interaction, and plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

/// Library recipe records, drafts, and ingredient types
pub mod recipe;

/// Caller-supplied inventory items
pub mod inventory;

/// User context and per-request recipe preferences
pub mod user;

/// Interaction signals driving the taste feedback loop
pub mod interaction;

/// Weekly plan and recipe response shapes
pub mod plan;

pub use interaction::{InteractionSignal, SignalKind};
pub use inventory::InventoryItem;
pub use plan::{DayPlan, MealSlot, PlannedMeal, RecipeResponse, ServingMode, SuggestedRecipe, WeeklyMealPlan};
pub use recipe::{LibraryRecipe, MealType, Provenance, RecipeDraft, RecipeIngredient};
pub use user::{RecipePreferences, UserContext};
