// ABOUTME: Integration tests for the composite scoring engine
// ABOUTME: Coverage, quality, preference factors, and ranking invariants
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

mod common;

use remy_engine::config::ScoringConfig;
use remy_engine::intelligence::scoring::ScoringEngine;
use remy_engine::intelligence::TasteEngine;
use remy_engine::models::{
    InventoryItem, LibraryRecipe, MealType, RecipeIngredient, RecipePreferences, UserContext,
};
use remy_engine::stores::InMemoryTasteStore;
use std::collections::HashSet;
use std::sync::Arc;

fn engine() -> ScoringEngine {
    common::init_test_logging();
    let taste = Arc::new(TasteEngine::new(Arc::new(InMemoryTasteStore::new())));
    ScoringEngine::new(ScoringConfig::default(), taste)
}

fn recipe_with(ingredients: &[&str]) -> LibraryRecipe {
    let mut recipe = LibraryRecipe::new("Test Dish", MealType::Dinner);
    for name in ingredients {
        recipe = recipe.with_ingredient(RecipeIngredient::named(*name));
    }
    recipe
}

fn inventory_set(names: &[&str]) -> HashSet<String> {
    remy_engine::intelligence::normalizer::normalized_name_set(names.iter().copied())
}

// ============================================================================
// Inventory coverage
// ============================================================================

#[test]
fn test_full_coverage_with_plural_mismatches() {
    let recipe = recipe_with(&["Tomatoes", "Onions", "Garlic"]);
    let inventory = inventory_set(&["tomato", "onion", "garlic clove"]);

    let result = ScoringEngine::compute_inventory_coverage(&recipe, &inventory);
    // Garlic vs "garlic clove" does not collide; 2 of 3 present
    assert!((result.coverage - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(result.missing, vec!["Garlic"]);
}

#[test]
fn test_coverage_bounds() {
    let recipe = recipe_with(&["tomato", "onion"]);
    let nothing = inventory_set(&[]);
    let everything = inventory_set(&["tomato", "onion"]);

    let empty = ScoringEngine::compute_inventory_coverage(&recipe, &nothing);
    let full = ScoringEngine::compute_inventory_coverage(&recipe, &everything);

    assert!(empty.coverage.abs() < f64::EPSILON);
    assert_eq!(empty.missing.len(), 2);
    assert!((full.coverage - 1.0).abs() < f64::EPSILON);
    assert!(full.missing.is_empty());
}

#[test]
fn test_coverage_of_ingredientless_recipe_is_zero_with_no_missing() {
    let recipe = recipe_with(&[]);
    let inventory = inventory_set(&["tomato"]);

    let result = ScoringEngine::compute_inventory_coverage(&recipe, &inventory);
    assert!(result.coverage.abs() < f64::EPSILON);
    assert!(result.missing.is_empty());
}

// ============================================================================
// Quality score
// ============================================================================

#[test]
fn test_quality_defaults_to_baseline() {
    let recipe = recipe_with(&["tomato"]);
    let score = ScoringEngine::compute_quality_score(&recipe);
    assert!((score - 0.55).abs() < 1e-9, "unrated recipe sits at the baseline");
}

#[test]
fn test_quality_stays_bounded_under_extreme_feedback() {
    let mut loved = recipe_with(&["tomato"]).with_quality_score(1.0);
    loved.thumbs_up = 1_000_000;
    loved.usage_count = u64::from(u32::MAX);

    let mut hated = recipe_with(&["tomato"]).with_quality_score(0.0);
    hated.thumbs_down = 1_000_000;

    let high = ScoringEngine::compute_quality_score(&loved);
    let low = ScoringEngine::compute_quality_score(&hated);

    assert!((0.0..=1.0).contains(&high));
    assert!((0.0..=1.0).contains(&low));
}

#[test]
fn test_feedback_adjustment_is_capped() {
    // All-positive votes push quality up by at most 0.1
    let mut recipe = recipe_with(&["tomato"]).with_quality_score(0.5);
    recipe.thumbs_up = 500;

    let score = ScoringEngine::compute_quality_score(&recipe);
    assert!(score <= 0.5 + 0.1 + 0.05 + 1e-9, "feedback + usage caps hold");
    assert!(score > 0.5, "positive feedback raises quality");
}

#[test]
fn test_usage_confidence_is_small_and_capped() {
    let mut seasoned = recipe_with(&["tomato"]).with_quality_score(0.5);
    seasoned.usage_count = 1_000_000;

    let mut fresh = recipe_with(&["tomato"]).with_quality_score(0.5);
    fresh.usage_count = 0;

    let seasoned_score = ScoringEngine::compute_quality_score(&seasoned);
    let fresh_score = ScoringEngine::compute_quality_score(&fresh);

    assert!((fresh_score - 0.5).abs() < 1e-9);
    assert!((seasoned_score - 0.55).abs() < 1e-9, "usage confidence caps at 0.05");
}

// ============================================================================
// Preference score
// ============================================================================

#[test]
fn test_preference_neutral_when_no_axes_supplied() {
    let recipe = recipe_with(&["tomato"]);
    let score = ScoringEngine::compute_preference_score(
        &recipe,
        &UserContext::default(),
        &RecipePreferences::default(),
    );
    assert!((score - 0.5).abs() < 1e-9);
}

#[test]
fn test_preference_meal_type_and_must_include() {
    let recipe = recipe_with(&["Tomatoes", "basil"]);
    let prefs = RecipePreferences {
        meal_type: Some(MealType::Dinner),
        must_include: Some("tomato".to_owned()),
        ..RecipePreferences::default()
    };

    let score =
        ScoringEngine::compute_preference_score(&recipe, &UserContext::default(), &prefs);
    assert!((score - 1.0).abs() < 1e-9, "both supplied axes match");
}

#[test]
fn test_preference_cuisine_partial_credit() {
    let recipe = recipe_with(&["tomato"]).with_cuisine("mexican");
    let user = UserContext {
        cuisine_preferences: vec!["italian".to_owned()],
        ..UserContext::default()
    };

    let score =
        ScoringEngine::compute_preference_score(&recipe, &user, &RecipePreferences::default());
    assert!((score - 0.4).abs() < 1e-9, "cuisine miss earns partial credit");

    let matching = recipe_with(&["tomato"]).with_cuisine("Italian");
    let score =
        ScoringEngine::compute_preference_score(&matching, &user, &RecipePreferences::default());
    assert!((score - 1.0).abs() < 1e-9, "cuisine match is case-insensitive");
}

// ============================================================================
// Ranking
// ============================================================================

#[tokio::test]
async fn test_rank_candidates_bounded_and_sorted() {
    let engine = engine();
    let inventory = vec![
        InventoryItem::named("tomato"),
        InventoryItem::named("onion"),
    ];

    let candidates = vec![
        recipe_with(&["tomato", "onion"]).with_quality_score(0.9),
        recipe_with(&["tofu", "rice", "seaweed"]),
        recipe_with(&["tomato", "caviar"]).with_quality_score(0.2),
    ];

    let ranked = engine
        .rank_candidates(
            candidates,
            &inventory,
            &UserContext::default(),
            &RecipePreferences::default(),
        )
        .await
        .unwrap();

    assert_eq!(ranked.len(), 3);
    for candidate in &ranked {
        assert!(
            (0.0..=1.0).contains(&candidate.composite),
            "composite must stay in [0,1]"
        );
    }
    for pair in ranked.windows(2) {
        assert!(
            pair[0].composite >= pair[1].composite,
            "output must be sorted non-increasing"
        );
    }
    assert_eq!(ranked[0].recipe.title, "Test Dish");
    assert!((ranked[0].coverage - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_sync_variant_matches_async_for_anonymous_users() {
    let engine = engine();
    let inventory = vec![InventoryItem::named("tomato")];
    let candidates = || vec![recipe_with(&["tomato", "basil"]).with_quality_score(0.8)];

    // Without a user id both paths substitute neutral taste/novelty
    let ranked_async = engine
        .rank_candidates(
            candidates(),
            &inventory,
            &UserContext::default(),
            &RecipePreferences::default(),
        )
        .await
        .unwrap();
    let ranked_sync = engine.rank_candidates_sync(
        candidates(),
        &inventory,
        &UserContext::default(),
        &RecipePreferences::default(),
    );

    assert!((ranked_async[0].composite - ranked_sync[0].composite).abs() < 1e-9);
    assert!((ranked_sync[0].taste_similarity - 0.5).abs() < f64::EPSILON);
    assert!((ranked_sync[0].novelty - 0.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_match_score_reflects_coverage() {
    let engine = engine();
    let inventory = vec![
        InventoryItem::named("tomato"),
        InventoryItem::named("onion"),
    ];

    let ranked = engine
        .rank_candidates(
            vec![recipe_with(&["tomato", "onion"])],
            &inventory,
            &UserContext::default(),
            &RecipePreferences::default(),
        )
        .await
        .unwrap();

    assert_eq!(ranked[0].match_score(), 100);
}
