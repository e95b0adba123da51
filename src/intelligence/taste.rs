// ABOUTME: Taste embedding subsystem: 26-axis encoder, EMA updates, similarity
// ABOUTME: TasteEngine caches recipe embeddings and applies interaction signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Taste embeddings.
//!
//! A taste embedding is a fixed 26-dimension vector over named semantic axes:
//! 6 cuisines, 4 flavors, 5 proteins, 5 cooking methods, 3 complexity bands,
//! and 3 time bands. One vector is kept per user (EMA-updated from
//! interaction signals) and one is cached per recipe (computed once,
//! heuristically, from its metadata).

use dashmap::DashMap;
use remy_core::constants::taste::{
    COMPLEX_INGREDIENT_COUNT, EMBEDDING_DIM, MEDIUM_MEAL_MINS, QUICK_MEAL_MINS,
    SIMPLE_INGREDIENT_COUNT,
};
use remy_core::errors::{AppError, AppResult};
use remy_core::models::{InteractionSignal, LibraryRecipe};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::stores::TasteStore;

// ============================================================================
// Axis layout
// ============================================================================

const CUISINE_OFFSET: usize = 0;
const FLAVOR_OFFSET: usize = 6;
const PROTEIN_OFFSET: usize = 10;
const METHOD_OFFSET: usize = 15;
const COMPLEXITY_OFFSET: usize = 20;
const TIME_OFFSET: usize = 23;

/// Named axes of the 26-dimension taste embedding, in vector order
pub const AXIS_NAMES: [&str; EMBEDDING_DIM] = [
    "cuisine_italian",
    "cuisine_mexican",
    "cuisine_asian",
    "cuisine_mediterranean",
    "cuisine_american",
    "cuisine_indian",
    "flavor_spicy",
    "flavor_sweet",
    "flavor_savory",
    "flavor_fresh",
    "protein_chicken",
    "protein_beef",
    "protein_pork",
    "protein_seafood",
    "protein_plant",
    "method_baked",
    "method_grilled",
    "method_fried",
    "method_stewed",
    "method_raw",
    "complexity_simple",
    "complexity_moderate",
    "complexity_complex",
    "time_quick",
    "time_medium",
    "time_long",
];

const CUISINES: [&str; 6] = [
    "italian",
    "mexican",
    "asian",
    "mediterranean",
    "american",
    "indian",
];

const FLAVOR_KEYWORDS: [&[&str]; 4] = [
    // spicy
    &["chili", "jalapeno", "sriracha", "cayenne", "harissa", "gochujang"],
    // sweet
    &["sugar", "honey", "maple", "chocolate", "caramel", "banana"],
    // savory
    &["soy sauce", "parmesan", "miso", "anchovy", "mushroom", "garlic"],
    // fresh
    &["lime", "lemon", "cilantro", "basil", "mint", "cucumber"],
];

/// Protein keyword groups, in axis order. The first matching group is a
/// recipe's primary protein for weekly variety tracking.
pub(crate) const PROTEIN_KEYWORDS: [(&str, &[&str]); 5] = [
    ("chicken", &["chicken", "turkey"]),
    ("beef", &["beef", "steak", "ground beef"]),
    ("pork", &["pork", "bacon", "ham", "sausage"]),
    ("seafood", &["salmon", "shrimp", "tuna", "cod", "fish"]),
    ("plant", &["tofu", "tempeh", "lentil", "chickpea", "bean"]),
];

const METHOD_KEYWORDS: [&[&str]; 5] = [
    // baked
    &["bake", "roast", "oven"],
    // grilled
    &["grill", "barbecue", "char"],
    // fried
    &["fry", "saute", "sear", "crisp"],
    // stewed
    &["simmer", "stew", "braise", "slow cook"],
    // raw
    &["no-cook", "assemble", "toss", "chill"],
];

// ============================================================================
// Vector operations
// ============================================================================

/// Scale `vector` to unit L2 norm in place; zero vectors are left unchanged.
pub fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Cosine similarity between two vectors; 0.0 when either has zero norm.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Exponential moving average of two equal-length vectors.
///
/// Returns `current * (1 - alpha) + signal * alpha`.
///
/// # Errors
///
/// Fails fast on a dimension mismatch; a partially blended vector would
/// silently corrupt the user's profile.
pub fn ema_update(current: &[f64], signal: &[f64], alpha: f64) -> AppResult<Vec<f64>> {
    if current.len() != signal.len() {
        return Err(AppError::value_out_of_range(format!(
            "embedding dimension mismatch: {} vs {}",
            current.len(),
            signal.len()
        )));
    }

    Ok(current
        .iter()
        .zip(signal.iter())
        .map(|(c, s)| c * (1.0 - alpha) + s * alpha)
        .collect())
}

/// The `n` highest-magnitude axes of an embedding, named, strongest first.
#[must_use]
pub fn dominant_axes(embedding: &[f64], n: usize) -> Vec<(&'static str, f64)> {
    let mut indexed: Vec<(usize, f64)> = embedding
        .iter()
        .copied()
        .enumerate()
        .take(AXIS_NAMES.len())
        .collect();

    indexed.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    indexed
        .into_iter()
        .take(n)
        .map(|(i, v)| (AXIS_NAMES[i], v))
        .collect()
}

// ============================================================================
// Recipe encoding
// ============================================================================

fn keyword_hit_strength(text: &str, keywords: &[&str]) -> f64 {
    // Max, not sum: three chili mentions are no spicier than one
    keywords
        .iter()
        .filter(|k| text.contains(*k))
        .map(|_| 1.0_f64)
        .fold(0.0, f64::max)
}

/// Deterministic rule-based encoder from recipe metadata to a taste embedding.
///
/// Sets the matching cuisine axis, scans ingredient text for protein and
/// flavor keywords, scans instruction text for method keywords, derives the
/// time and complexity bands from total minutes and ingredient count, and
/// L2-normalizes the result.
#[must_use]
pub fn generate_recipe_embedding(recipe: &LibraryRecipe) -> Vec<f64> {
    let mut embedding = vec![0.0_f64; EMBEDDING_DIM];

    if let Some(cuisine) = &recipe.cuisine {
        let cuisine = cuisine.to_lowercase();
        for (i, name) in CUISINES.iter().enumerate() {
            if cuisine.contains(name) {
                embedding[CUISINE_OFFSET + i] = 1.0;
            }
        }
    }

    let ingredient_text = recipe.ingredient_text().to_lowercase();
    for (i, keywords) in FLAVOR_KEYWORDS.iter().enumerate() {
        embedding[FLAVOR_OFFSET + i] = keyword_hit_strength(&ingredient_text, keywords);
    }
    for (i, (_, keywords)) in PROTEIN_KEYWORDS.iter().enumerate() {
        embedding[PROTEIN_OFFSET + i] = keyword_hit_strength(&ingredient_text, keywords);
    }

    let instruction_text = recipe.instruction_text().to_lowercase();
    for (i, keywords) in METHOD_KEYWORDS.iter().enumerate() {
        embedding[METHOD_OFFSET + i] = keyword_hit_strength(&instruction_text, keywords);
    }

    let total_mins = recipe.total_time_mins();
    let (time_idx, complexity_idx) = if total_mins <= QUICK_MEAL_MINS {
        (0, 0) // quick / simple
    } else if total_mins <= MEDIUM_MEAL_MINS {
        (1, 1) // medium / moderate
    } else {
        (2, 2) // long / complex
    };
    embedding[TIME_OFFSET + time_idx] = 1.0;
    embedding[COMPLEXITY_OFFSET + complexity_idx] = 1.0;

    // Ingredient count reinforces the complexity band at the extremes
    let ingredient_count = recipe.ingredients.len();
    if ingredient_count <= SIMPLE_INGREDIENT_COUNT {
        embedding[COMPLEXITY_OFFSET] = 1.0;
    } else if ingredient_count >= COMPLEX_INGREDIENT_COUNT {
        embedding[COMPLEXITY_OFFSET + 2] = 1.0;
    }

    l2_normalize(&mut embedding);
    embedding
}

/// First protein keyword group matched by a recipe's ingredient text.
///
/// First match wins; later groups are ignored.
#[must_use]
pub fn primary_protein(recipe: &LibraryRecipe) -> Option<&'static str> {
    let text = recipe.ingredient_text().to_lowercase();
    PROTEIN_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(name, _)| *name)
}

// ============================================================================
// Taste engine
// ============================================================================

/// Read-through embedding access and interaction-signal application.
///
/// Wraps the [`TasteStore`] collaborator with a process-local cache so that
/// ranking a candidate list does not re-fetch the same recipe embedding 21
/// times during one weekly plan.
pub struct TasteEngine {
    store: Arc<dyn TasteStore>,
    cache: DashMap<Uuid, Vec<f64>>,
}

impl TasteEngine {
    /// Create an engine over a taste store
    #[must_use]
    pub fn new(store: Arc<dyn TasteStore>) -> Self {
        Self {
            store,
            cache: DashMap::new(),
        }
    }

    /// Underlying store handle
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TasteStore> {
        &self.store
    }

    /// Fetch-or-compute the embedding for a recipe.
    ///
    /// Cache order: process-local map, then the store, then the rule-based
    /// encoder (persisting the computed vector for future calls).
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn recipe_embedding(&self, recipe: &LibraryRecipe) -> AppResult<Vec<f64>> {
        if let Some(cached) = self.cache.get(&recipe.id) {
            return Ok(cached.clone());
        }

        if let Some(stored) = self.store.get_recipe_embedding(recipe.id).await? {
            self.cache.insert(recipe.id, stored.clone());
            return Ok(stored);
        }

        let computed = generate_recipe_embedding(recipe);
        self.store
            .upsert_recipe_embedding(recipe.id, &computed)
            .await?;
        self.cache.insert(recipe.id, computed.clone());
        Ok(computed)
    }

    /// Apply an interaction signal to the user's taste profile.
    ///
    /// Fetches-or-computes the recipe embedding, scales it by the signal's
    /// sign, EMA-updates the stored user embedding at the signal's weight,
    /// re-normalizes, persists, and increments the interaction counter.
    ///
    /// # Errors
    ///
    /// Propagates store failures and embedding dimension mismatches.
    pub async fn apply_signal(
        &self,
        signal: &InteractionSignal,
        recipe: &LibraryRecipe,
    ) -> AppResult<()> {
        let recipe_embedding = self.recipe_embedding(recipe).await?;

        let signed = signal.kind.signed_weight();
        let alpha = signed.abs();
        let sign = signed.signum();

        let delta: Vec<f64> = recipe_embedding.iter().map(|v| v * sign).collect();

        let current = self
            .store
            .get_user_profile(signal.user_id)
            .await?
            .map_or_else(|| vec![0.0; EMBEDDING_DIM], |p| p.embedding);

        let mut updated = ema_update(&current, &delta, alpha)?;
        l2_normalize(&mut updated);

        self.store
            .upsert_user_profile(signal.user_id, &updated, true)
            .await?;

        debug!(
            user_id = %signal.user_id,
            recipe_id = %signal.recipe_id,
            kind = ?signal.kind,
            "applied interaction signal to taste profile"
        );

        Ok(())
    }
}
