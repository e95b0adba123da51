// ABOUTME: Natural-language prompt builders for the generation service
// ABOUTME: Embeds inventory, user context, and preferences into recipe prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Prompt construction for recipe generation.

use remy_core::models::{InventoryItem, RecipePreferences, UserContext};
use std::fmt::Write;

/// System prompt pinning the response to strict JSON
pub const RECIPE_SYSTEM_PROMPT: &str = "You are a recipe writer for a home-cooking assistant. \
    Respond with JSON only, no prose. Return an object with a \"recipes\" array; each recipe \
    has: title, description, ingredients (array of {name, amount}), instructions (array of \
    strings), cuisine, meal_type (breakfast|lunch|dinner|snack), diet_tags, allergens, \
    prep_time_mins, cook_time_mins, servings, calories.";

/// Build the generation prompt for one meal slot.
///
/// Embeds the caller's inventory, the user's standing context, and the
/// per-request preferences as plain constraints the service can follow.
#[must_use]
pub fn build_recipe_prompt(
    inventory: &[InventoryItem],
    user: &UserContext,
    prefs: &RecipePreferences,
) -> String {
    let mut prompt = String::from("Create a recipe using what is available in this kitchen.\n");

    if inventory.is_empty() {
        prompt.push_str("Available ingredients: none listed; assume a basic pantry.\n");
    } else {
        prompt.push_str("Available ingredients: ");
        for (i, item) in inventory.iter().enumerate() {
            if i > 0 {
                prompt.push_str(", ");
            }
            prompt.push_str(&item.name);
            if let Some(quantity) = &item.quantity {
                let _ = write!(prompt, " ({quantity})");
            }
        }
        prompt.push('\n');
    }

    if let Some(meal_type) = prefs.meal_type {
        let _ = writeln!(prompt, "Meal: {}.", meal_type.label());
    }

    let servings = prefs.servings.or(user.household_size);
    if let Some(servings) = servings {
        let _ = writeln!(prompt, "Servings: {servings}.");
    }

    if let Some(max) = prefs.max_minutes.or(user.max_cooking_minutes) {
        let _ = writeln!(prompt, "Total prep and cook time must stay under {max} minutes.");
    }

    if !user.dietary_restrictions.is_empty() {
        let _ = writeln!(
            prompt,
            "Dietary restrictions: {}.",
            user.dietary_restrictions.join(", ")
        );
    }

    if !user.allergies.is_empty() {
        let _ = writeln!(
            prompt,
            "Strictly exclude these allergens: {}.",
            user.allergies.join(", ")
        );
    }

    if !user.cuisine_preferences.is_empty() {
        let _ = writeln!(
            prompt,
            "Preferred cuisines: {}.",
            user.cuisine_preferences.join(", ")
        );
    }

    if let Some(must_include) = &prefs.must_include {
        let _ = writeln!(prompt, "The recipe must include {must_include}.");
    }

    if let Some(cravings) = &prefs.cravings {
        let _ = writeln!(prompt, "The user is in the mood for: {cravings}.");
    }

    prompt.push_str("Prefer ingredients already available; keep missing purchases minimal.");
    prompt
}
