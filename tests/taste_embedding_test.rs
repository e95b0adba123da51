// ABOUTME: Integration tests for the taste embedding subsystem
// ABOUTME: Encoder classification, EMA identities, and signal application
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

mod common;

use remy_engine::intelligence::taste::{
    cosine_similarity, dominant_axes, ema_update, generate_recipe_embedding, primary_protein,
    TasteEngine, AXIS_NAMES,
};
use remy_engine::models::{
    InteractionSignal, LibraryRecipe, MealType, RecipeIngredient, SignalKind,
};
use remy_engine::stores::{InMemoryTasteStore, TasteStore};
use remy_engine::ErrorCode;
use std::sync::Arc;
use uuid::Uuid;

fn recipe(total_mins: u32, ingredient_count: usize) -> LibraryRecipe {
    let mut r = LibraryRecipe::new("Axis Probe", MealType::Dinner).with_times(total_mins, 0);
    for i in 0..ingredient_count {
        r = r.with_ingredient(RecipeIngredient::named(format!("ingredient {i}")));
    }
    r
}

// ============================================================================
// Encoder
// ============================================================================

#[test]
fn test_embedding_has_fixed_dimension_and_unit_norm() {
    let embedding = generate_recipe_embedding(&recipe(30, 6));
    assert_eq!(embedding.len(), AXIS_NAMES.len());

    let norm: f64 = embedding.iter().map(|v| v * v).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-9, "embedding must be L2-normalized");
}

#[test]
fn test_quick_simple_recipe_classification() {
    // 10 minutes, 4 ingredients
    let embedding = generate_recipe_embedding(&recipe(10, 4));

    let dominant: Vec<&str> = dominant_axes(&embedding, 2)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(dominant.contains(&"time_quick"), "dominant axes: {dominant:?}");
    assert!(
        dominant.contains(&"complexity_simple"),
        "dominant axes: {dominant:?}"
    );
}

#[test]
fn test_long_complex_recipe_classification() {
    // 60 minutes, 14 ingredients
    let embedding = generate_recipe_embedding(&recipe(60, 14));

    let dominant: Vec<&str> = dominant_axes(&embedding, 2)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(dominant.contains(&"time_long"), "dominant axes: {dominant:?}");
    assert!(
        dominant.contains(&"complexity_complex"),
        "dominant axes: {dominant:?}"
    );
}

#[test]
fn test_cuisine_and_protein_axes_fire() {
    let recipe = LibraryRecipe::new("Chicken Cacciatore", MealType::Dinner)
        .with_cuisine("Italian")
        .with_times(25, 20)
        .with_ingredient(RecipeIngredient::named("chicken thighs"))
        .with_ingredient(RecipeIngredient::named("tomatoes"))
        .with_instruction("Simmer gently until the chicken is tender.");

    let embedding = generate_recipe_embedding(&recipe);
    let axis = |name: &str| {
        let idx = AXIS_NAMES.iter().position(|n| *n == name).unwrap();
        embedding[idx]
    };

    assert!(axis("cuisine_italian") > 0.0);
    assert!(axis("protein_chicken") > 0.0);
    assert!(axis("method_stewed") > 0.0, "simmer maps to the stewed axis");
    assert!(axis("cuisine_mexican").abs() < f64::EPSILON);
}

#[test]
fn test_primary_protein_first_match_wins() {
    let surf_and_turf = LibraryRecipe::new("Surf and Turf", MealType::Dinner)
        .with_ingredient(RecipeIngredient::named("beef tenderloin"))
        .with_ingredient(RecipeIngredient::named("shrimp"));

    // Chicken group is scanned first, then beef; beef wins here
    assert_eq!(primary_protein(&surf_and_turf), Some("beef"));

    let plain = LibraryRecipe::new("Buttered Noodles", MealType::Dinner)
        .with_ingredient(RecipeIngredient::named("egg noodles"));
    assert_eq!(primary_protein(&plain), None);
}

// ============================================================================
// EMA update
// ============================================================================

#[test]
fn test_ema_full_replacement_and_no_op() {
    let current = vec![0.5, 0.5, 0.0];
    let signal = vec![0.0, 1.0, 1.0];

    let replaced = ema_update(&current, &signal, 1.0).unwrap();
    assert_eq!(replaced, signal, "alpha 1.0 is full replacement");

    let unchanged = ema_update(&current, &signal, 0.0).unwrap();
    assert_eq!(unchanged, current, "alpha 0.0 is a no-op");

    let identity = ema_update(&current, &current, 1.0).unwrap();
    assert_eq!(identity, current);
}

#[test]
fn test_ema_rejects_dimension_mismatch() {
    let err = ema_update(&[0.5, 0.5], &[1.0], 0.5).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_cosine_similarity_edges() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
    assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).abs() < f64::EPSILON);
}

// ============================================================================
// Signal application
// ============================================================================

#[tokio::test]
async fn test_thumbs_up_moves_profile_toward_recipe() {
    common::init_test_logging();
    let store = Arc::new(InMemoryTasteStore::new());
    let engine = TasteEngine::new(Arc::clone(&store) as Arc<dyn TasteStore>);

    let recipe = LibraryRecipe::new("Margherita", MealType::Dinner)
        .with_cuisine("italian")
        .with_times(15, 10)
        .with_ingredient(RecipeIngredient::named("tomatoes"))
        .with_ingredient(RecipeIngredient::named("basil"));

    let user_id = Uuid::new_v4();
    let signal = InteractionSignal::new(user_id, recipe.id, SignalKind::ThumbsUp);
    engine.apply_signal(&signal, &recipe).await.unwrap();

    let profile = store.get_user_profile(user_id).await.unwrap().unwrap();
    assert_eq!(profile.interaction_count, 1);

    let recipe_embedding = generate_recipe_embedding(&recipe);
    let similarity = cosine_similarity(&profile.embedding, &recipe_embedding);
    assert!(
        similarity > 0.99,
        "first positive signal aligns the profile with the recipe, got {similarity}"
    );
}

#[tokio::test]
async fn test_thumbs_down_moves_profile_away_from_recipe() {
    common::init_test_logging();
    let store = Arc::new(InMemoryTasteStore::new());
    let engine = TasteEngine::new(Arc::clone(&store) as Arc<dyn TasteStore>);

    let recipe = LibraryRecipe::new("Liver Surprise", MealType::Dinner)
        .with_times(50, 20)
        .with_ingredient(RecipeIngredient::named("beef liver"));

    let user_id = Uuid::new_v4();
    let signal = InteractionSignal::new(user_id, recipe.id, SignalKind::ThumbsDown);
    engine.apply_signal(&signal, &recipe).await.unwrap();

    let profile = store.get_user_profile(user_id).await.unwrap().unwrap();
    let recipe_embedding = generate_recipe_embedding(&recipe);
    let similarity = cosine_similarity(&profile.embedding, &recipe_embedding);
    assert!(
        similarity < -0.99,
        "negative signal points the profile away from the recipe, got {similarity}"
    );
}

#[tokio::test]
async fn test_recipe_embedding_is_cached_in_store() {
    common::init_test_logging();
    let store = Arc::new(InMemoryTasteStore::new());
    let engine = TasteEngine::new(Arc::clone(&store) as Arc<dyn TasteStore>);

    let recipe = recipe(30, 6);
    assert!(store.get_recipe_embedding(recipe.id).await.unwrap().is_none());

    let computed = engine.recipe_embedding(&recipe).await.unwrap();
    let persisted = store.get_recipe_embedding(recipe.id).await.unwrap().unwrap();
    assert_eq!(computed, persisted, "computed embedding is persisted for reuse");
}
