// ABOUTME: Multi-factor composite scoring for library recipe candidates
// ABOUTME: Coverage, quality, preference, taste similarity, and novelty ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Candidate scoring.
//!
//! Blends five bounded factors into a single composite desirability score in
//! [0,1]: inventory coverage, explicit preference match, library quality,
//! taste-embedding similarity, and a novelty bonus. Taste and novelty need a
//! user id and async store access; the sync variant substitutes a neutral
//! 0.5 for both.

use remy_core::constants::scoring::{
    CUISINE_PARTIAL_CREDIT, FEEDBACK_ADJUST_CAP, FEEDBACK_ADJUST_SPAN, NEUTRAL_SCORE,
    QUALITY_BASELINE, USAGE_CONFIDENCE_CAP, USAGE_CONFIDENCE_SCALE,
};
use remy_core::errors::AppResult;
use remy_core::models::{InventoryItem, LibraryRecipe, RecipePreferences, UserContext};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::intelligence::normalizer;
use crate::intelligence::taste::{cosine_similarity, TasteEngine};

/// Inventory coverage for one candidate
#[derive(Debug, Clone)]
pub struct InventoryCoverage {
    /// Fraction of the recipe's ingredients present in the inventory
    pub coverage: f64,
    /// Ingredients the inventory is missing, raw recipe spelling
    pub missing: Vec<String>,
}

/// A library recipe wrapped with its scoring factors
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    /// The scored recipe
    pub recipe: LibraryRecipe,
    /// Inventory coverage ratio in [0,1]
    pub coverage: f64,
    /// Ingredients missing from the inventory
    pub missing_ingredients: Vec<String>,
    /// Explicit preference score in [0,1]
    pub preference_score: f64,
    /// Feedback-adjusted quality score in [0,1]
    pub quality_score: f64,
    /// Taste-embedding similarity in [0,1]
    pub taste_similarity: f64,
    /// Novelty bonus in [0,1]
    pub novelty: f64,
    /// Weighted composite score, clamped to [0,1]
    pub composite: f64,
}

impl RankedCandidate {
    /// Inventory coverage rounded onto a 0-100 scale; the caller-facing
    /// "how much of this can I cook right now" number
    #[must_use]
    pub fn match_score(&self) -> u8 {
        (self.coverage * 100.0).round() as u8
    }
}

/// Multi-factor candidate scoring engine
pub struct ScoringEngine {
    config: ScoringConfig,
    taste: Arc<TasteEngine>,
}

impl ScoringEngine {
    /// Create an engine with the given configuration and taste access
    #[must_use]
    pub fn new(config: ScoringConfig, taste: Arc<TasteEngine>) -> Self {
        Self { config, taste }
    }

    /// Scoring configuration in effect
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Fraction of the recipe's normalized ingredient names present in the
    /// normalized inventory set, plus the missing list for gate decisions.
    ///
    /// A recipe with no ingredients scores 0 with nothing missing.
    #[must_use]
    pub fn compute_inventory_coverage(
        recipe: &LibraryRecipe,
        inventory: &HashSet<String>,
    ) -> InventoryCoverage {
        if recipe.ingredients.is_empty() {
            return InventoryCoverage {
                coverage: 0.0,
                missing: Vec::new(),
            };
        }

        let mut present = 0_usize;
        let mut missing = Vec::new();

        for ingredient in &recipe.ingredients {
            let normalized = normalizer::normalize(&ingredient.name);
            if inventory.contains(&normalized) {
                present += 1;
            } else {
                missing.push(ingredient.name.clone());
            }
        }

        InventoryCoverage {
            coverage: present as f64 / recipe.ingredients.len() as f64,
            missing,
        }
    }

    /// Stored base quality adjusted by bounded feedback and usage terms.
    ///
    /// Both adjustments are small so a single or few feedback events cannot
    /// dominate the base quality.
    #[must_use]
    pub fn compute_quality_score(recipe: &LibraryRecipe) -> f64 {
        let base = recipe.quality_score.unwrap_or(QUALITY_BASELINE);

        let votes = recipe.thumbs_up + recipe.thumbs_down;
        let feedback = if votes == 0 {
            0.0
        } else {
            let upvote_ratio = recipe.thumbs_up as f64 / votes as f64;
            ((upvote_ratio - 0.5) * FEEDBACK_ADJUST_SPAN)
                .clamp(-FEEDBACK_ADJUST_CAP, FEEDBACK_ADJUST_CAP)
        };

        let usage_confidence =
            ((recipe.usage_count as f64 + 1.0).log10() * USAGE_CONFIDENCE_SCALE)
                .min(USAGE_CONFIDENCE_CAP);

        (base + feedback + usage_confidence).clamp(0.0, 1.0)
    }

    /// Average over only the preference axes the caller actually supplied:
    /// meal-type match, must-include match, and cuisine preference (with
    /// partial credit for a miss against a non-empty list). No supplied
    /// axes yields a neutral 0.5.
    #[must_use]
    pub fn compute_preference_score(
        recipe: &LibraryRecipe,
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> f64 {
        let mut total = 0.0;
        let mut axes = 0_u32;

        if let Some(meal_type) = prefs.meal_type {
            axes += 1;
            if recipe.meal_type == meal_type {
                total += 1.0;
            }
        }

        if let Some(must_include) = &prefs.must_include {
            axes += 1;
            let wanted = normalizer::normalize(must_include);
            let has_it = recipe
                .ingredient_names()
                .any(|name| normalizer::normalize(name) == wanted);
            if has_it {
                total += 1.0;
            }
        }

        if !user.cuisine_preferences.is_empty() {
            axes += 1;
            let matches = recipe.cuisine.as_ref().is_some_and(|cuisine| {
                let cuisine = cuisine.to_lowercase();
                user.cuisine_preferences
                    .iter()
                    .any(|p| p.to_lowercase() == cuisine)
            });
            total += if matches { 1.0 } else { CUISINE_PARTIAL_CREDIT };
        }

        if axes == 0 {
            NEUTRAL_SCORE
        } else {
            total / f64::from(axes)
        }
    }

    /// Taste similarity for a user with an established profile; neutral 0.5
    /// without a user id or with fewer than the configured minimum recorded
    /// interactions.
    ///
    /// # Errors
    ///
    /// Propagates taste-store failures.
    pub async fn taste_similarity(
        &self,
        user: &UserContext,
        recipe: &LibraryRecipe,
    ) -> AppResult<f64> {
        let Some(user_id) = user.user_id else {
            return Ok(NEUTRAL_SCORE);
        };

        let Some(profile) = self.taste.store().get_user_profile(user_id).await? else {
            return Ok(NEUTRAL_SCORE);
        };

        if profile.interaction_count < self.config.min_interactions_for_taste {
            return Ok(NEUTRAL_SCORE);
        }

        let recipe_embedding = self.taste.recipe_embedding(recipe).await?;
        let cosine = cosine_similarity(&profile.embedding, &recipe_embedding);

        // Remap [-1,1] onto [0,1]
        Ok((cosine + 1.0) / 2.0)
    }

    /// Novelty bonus from the trailing-window interaction count with this
    /// exact recipe: full bonus at zero, decaying stepwise to near-zero at
    /// four or more. Neutral 0.5 without a user id.
    ///
    /// # Errors
    ///
    /// Propagates taste-store failures.
    pub async fn novelty(&self, user: &UserContext, recipe_id: Uuid) -> AppResult<f64> {
        let Some(user_id) = user.user_id else {
            return Ok(NEUTRAL_SCORE);
        };

        let count = self
            .taste
            .store()
            .count_recent_interactions(user_id, recipe_id, self.config.novelty_window_days)
            .await?;

        Ok(match count {
            0 => 1.0,
            1 => 0.7,
            2 => 0.45,
            3 => 0.2,
            _ => 0.05,
        })
    }

    fn composite(&self, candidate: &RankedCandidate) -> f64 {
        let w = &self.config.weights;
        let sum = candidate.coverage * w.coverage
            + candidate.preference_score * w.preference
            + candidate.quality_score * w.quality
            + candidate.taste_similarity * w.taste
            + candidate.novelty * w.novelty;
        sum.clamp(0.0, 1.0)
    }

    fn base_candidate(
        recipe: LibraryRecipe,
        inventory: &HashSet<String>,
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> RankedCandidate {
        let InventoryCoverage { coverage, missing } =
            Self::compute_inventory_coverage(&recipe, inventory);
        let preference_score = Self::compute_preference_score(&recipe, user, prefs);
        let quality_score = Self::compute_quality_score(&recipe);

        RankedCandidate {
            recipe,
            coverage,
            missing_ingredients: missing,
            preference_score,
            quality_score,
            taste_similarity: NEUTRAL_SCORE,
            novelty: NEUTRAL_SCORE,
            composite: 0.0,
        }
    }

    fn sort_ranked(candidates: &mut [RankedCandidate]) {
        // Stable sort: ties keep their input order
        candidates.sort_by(|a, b| {
            b.composite
                .partial_cmp(&a.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Rank candidates with all five factors, sorted non-increasing by
    /// composite score.
    ///
    /// # Errors
    ///
    /// Propagates taste-store failures.
    pub async fn rank_candidates(
        &self,
        candidates: Vec<LibraryRecipe>,
        inventory: &[InventoryItem],
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> AppResult<Vec<RankedCandidate>> {
        let inventory_set = normalizer::normalized_name_set(inventory.iter().map(|i| &i.name));

        let mut ranked = Vec::with_capacity(candidates.len());
        for recipe in candidates {
            let mut candidate = Self::base_candidate(recipe, &inventory_set, user, prefs);
            candidate.taste_similarity = self.taste_similarity(user, &candidate.recipe).await?;
            candidate.novelty = self.novelty(user, candidate.recipe.id).await?;
            candidate.composite = self.composite(&candidate);
            ranked.push(candidate);
        }

        Self::sort_ranked(&mut ranked);
        Ok(ranked)
    }

    /// Rank candidates without async context; taste similarity and novelty
    /// are substituted with a neutral 0.5.
    #[must_use]
    pub fn rank_candidates_sync(
        &self,
        candidates: Vec<LibraryRecipe>,
        inventory: &[InventoryItem],
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> Vec<RankedCandidate> {
        let inventory_set = normalizer::normalized_name_set(inventory.iter().map(|i| &i.name));

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|recipe| {
                let mut candidate = Self::base_candidate(recipe, &inventory_set, user, prefs);
                candidate.composite = self.composite(&candidate);
                candidate
            })
            .collect();

        Self::sort_ranked(&mut ranked);
        ranked
    }
}
