// ABOUTME: Integration tests for weekly variety and effort balancing
// ABOUTME: Penalty arithmetic, multiplier bounds, and context bookkeeping
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

mod common;

use remy_engine::config::WeeklyConfig;
use remy_engine::intelligence::scoring::RankedCandidate;
use remy_engine::intelligence::weekly::{WeeklyContext, WeeklyOptimizer};
use remy_engine::models::{LibraryRecipe, MealType, RecipeIngredient};

fn optimizer() -> WeeklyOptimizer {
    WeeklyOptimizer::new(WeeklyConfig::default())
}

fn recipe(title: &str, cuisine: &str, protein: &str, total_mins: u32) -> LibraryRecipe {
    LibraryRecipe::new(title, MealType::Dinner)
        .with_cuisine(cuisine)
        .with_times(total_mins, 0)
        .with_ingredient(RecipeIngredient::named(protein))
        .with_ingredient(RecipeIngredient::named("onion"))
}

fn ranked(recipe: LibraryRecipe, composite: f64) -> RankedCandidate {
    RankedCandidate {
        coverage: 1.0,
        missing_ingredients: Vec::new(),
        preference_score: 0.5,
        quality_score: 0.5,
        taste_similarity: 0.5,
        novelty: 0.5,
        composite,
        recipe,
    }
}

// ============================================================================
// Variety score
// ============================================================================

#[test]
fn test_fresh_context_has_full_variety() {
    let opt = optimizer();
    let ctx = WeeklyContext::new();
    let r = recipe("Tacos", "mexican", "beef", 35);

    assert!((opt.variety_score(&r, &ctx) - 1.0).abs() < 1e-9);
}

#[test]
fn test_exact_repeat_is_vetoed() {
    let opt = optimizer();
    let mut ctx = WeeklyContext::new();
    let r = recipe("Tacos", "mexican", "beef", 35);

    WeeklyOptimizer::update_context(&mut ctx, &r);
    assert!(
        opt.variety_score(&r, &ctx).abs() < f64::EPSILON,
        "a recipe already used this week scores zero variety"
    );
}

#[test]
fn test_cuisine_penalty_accumulates_and_caps() {
    let opt = optimizer();
    let mut ctx = WeeklyContext::new();

    for i in 0..5 {
        let used = recipe(&format!("Dish {i}"), "italian", "chicken", 35);
        WeeklyOptimizer::update_context(&mut ctx, &used);
    }

    // Disjoint ingredient names so no overlap bonus muddies the arithmetic:
    // cuisine penalty caps at 0.5, protein at 3rd+ use adds 0.3
    let next = LibraryRecipe::new("Dish 6", MealType::Dinner)
        .with_cuisine("italian")
        .with_times(35, 0)
        .with_ingredient(RecipeIngredient::named("chicken breast"))
        .with_ingredient(RecipeIngredient::named("fennel"));
    let expected_penalty = 0.5 + 0.3;

    let variety = opt.variety_score(&next, &ctx);
    assert!(
        (variety - (1.0 - expected_penalty)).abs() < 1e-9,
        "expected variety {}, got {variety}",
        1.0 - expected_penalty
    );
}

#[test]
fn test_protein_second_use_penalty() {
    let opt = optimizer();
    let mut ctx = WeeklyContext::new();

    WeeklyOptimizer::update_context(&mut ctx, &recipe("Roast", "american", "chicken", 35));

    // Different cuisine, disjoint ingredients, same primary protein
    let next = LibraryRecipe::new("Stir Fry", MealType::Dinner)
        .with_cuisine("asian")
        .with_times(35, 0)
        .with_ingredient(RecipeIngredient::named("chicken thighs"))
        .with_ingredient(RecipeIngredient::named("bok choy"));

    let variety = opt.variety_score(&next, &ctx);
    assert!(
        (variety - 0.9).abs() < 1e-9,
        "second protein use costs 0.1, got {variety}"
    );
}

#[test]
fn test_ingredient_overlap_earns_bonus() {
    let opt = optimizer();
    let mut ctx = WeeklyContext::new();

    WeeklyOptimizer::update_context(&mut ctx, &recipe("Pasta", "italian", "chicken", 35));

    // Same cuisine (0.15 penalty), same protein keyword via identical
    // ingredient ("chicken"), full ingredient overlap (bonus 0.2)
    let next = recipe("Pasta Again", "italian", "chicken", 35);
    let variety = opt.variety_score(&next, &ctx);

    let expected = 1.0 - (0.15 + 0.1 - 0.2);
    assert!(
        (variety - expected).abs() < 1e-9,
        "expected {expected}, got {variety}"
    );
}

// ============================================================================
// Effort score
// ============================================================================

#[test]
fn test_effort_on_target_scores_one() {
    let opt = optimizer();
    let ctx = WeeklyContext::new();
    let r = recipe("Balanced", "italian", "chicken", 35);

    assert!((opt.effort_score(&r, &ctx) - 1.0).abs() < 1e-9);
}

#[test]
fn test_effort_deviation_at_target_scores_zero() {
    let opt = optimizer();
    let ctx = WeeklyContext::new();

    // 70 minutes against a 35-minute target: deviation equals the target
    let heavy = recipe("Feast", "italian", "chicken", 70);
    assert!(opt.effort_score(&heavy, &ctx).abs() < f64::EPSILON);

    // Zero-minute recipe: deviation also equals the target
    let instant = recipe("Cereal", "american", "chicken", 0);
    assert!(opt.effort_score(&instant, &ctx).abs() < f64::EPSILON);
}

#[test]
fn test_effort_uses_running_average() {
    let opt = optimizer();
    let mut ctx = WeeklyContext::new();

    // One 20-minute slot committed; a 50-minute candidate averages to 35
    WeeklyOptimizer::update_context(&mut ctx, &recipe("Quick", "asian", "tofu", 20));
    let candidate = recipe("Slow", "indian", "chicken", 50);

    assert!((opt.effort_score(&candidate, &ctx) - 1.0).abs() < 1e-9);
}

// ============================================================================
// Adjustment
// ============================================================================

#[test]
fn test_adjust_keeps_scores_bounded_and_resorts() {
    let opt = optimizer();
    let mut ctx = WeeklyContext::new();

    let used = recipe("Tacos", "mexican", "beef", 35);
    WeeklyOptimizer::update_context(&mut ctx, &used);

    let repeat = ranked(used.clone(), 0.95);
    let fresh = ranked(recipe("Curry", "indian", "chicken", 35), 0.80);

    let adjusted = opt.adjust(vec![repeat, fresh], &ctx);

    for candidate in &adjusted {
        assert!((0.0..=1.0).contains(&candidate.composite));
    }
    assert_eq!(
        adjusted[0].recipe.title, "Curry",
        "the vetoed repeat falls behind the fresh candidate"
    );
    assert!(adjusted[0].composite > adjusted[1].composite);
}

#[test]
fn test_multiplier_ceiling_cannot_push_score_past_one() {
    let opt = optimizer();
    let ctx = WeeklyContext::new();

    // Perfect variety and effort: multiplier 1.2 on a 0.9 composite
    let candidate = ranked(recipe("Great", "italian", "chicken", 35), 0.9);
    let adjusted = opt.adjust(vec![candidate], &ctx);

    assert!((adjusted[0].composite - 1.0).abs() < f64::EPSILON);
}

// ============================================================================
// Context bookkeeping
// ============================================================================

#[test]
fn test_update_context_records_all_dimensions() {
    let mut ctx = WeeklyContext::new();
    let r = recipe("Tacos", "Mexican", "beef", 40);

    WeeklyOptimizer::update_context(&mut ctx, &r);

    assert!(ctx.used_recipe_ids.contains(&r.id));
    assert_eq!(ctx.cuisine_counts.get("mexican"), Some(&1));
    assert_eq!(ctx.protein_counts.get("beef"), Some(&1));
    assert!(ctx.used_ingredients.contains("beef"));
    assert!(ctx.used_ingredients.contains("onion"));
    assert_eq!(ctx.total_effort_mins, 40);
    assert_eq!(ctx.slots_planned, 1);
}
