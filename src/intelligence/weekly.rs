// ABOUTME: Weekly variety and effort balancing across 21 sequential plan slots
// ABOUTME: WeeklyContext state plus the candidate re-weighting optimizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Weekly plan balancing.
//!
//! A weekly plan is 21 strictly sequential slot decisions (7 days × three
//! meals). Each slot reads and mutates the shared [`WeeklyContext`], so the
//! loop must stay sequential: parallel slots would race on the context and
//! break the no-repeat and effort-balance guarantees. The context is owned
//! by the single call that spans the loop and is never persisted.

use remy_core::constants::weekly::{
    CUISINE_PENALTY_CAP, CUISINE_REPEAT_PENALTY, EXACT_REPEAT_PENALTY,
    INGREDIENT_OVERLAP_BONUS_CAP, PROTEIN_SECOND_USE_PENALTY, PROTEIN_THIRD_USE_PENALTY,
};
use remy_core::models::LibraryRecipe;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::config::WeeklyConfig;
use crate::intelligence::normalizer;
use crate::intelligence::scoring::RankedCandidate;
use crate::intelligence::taste::primary_protein;

/// Mutable, plan-scoped state for one weekly plan
///
/// Created at the start of a weekly-plan request and discarded at the end.
#[derive(Debug, Default)]
pub struct WeeklyContext {
    /// Library ids already committed to a slot this week
    pub used_recipe_ids: HashSet<Uuid>,
    /// Times each cuisine has been used this week
    pub cuisine_counts: HashMap<String, u32>,
    /// Times each primary protein has been used this week
    pub protein_counts: HashMap<String, u32>,
    /// Accumulated effort minutes across committed slots
    pub total_effort_mins: u32,
    /// Slots committed so far
    pub slots_planned: u32,
    /// Normalized ingredient names used so far
    pub used_ingredients: HashSet<String>,
}

impl WeeklyContext {
    /// Fresh context for a new plan
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Re-weights ranked candidates against the running weekly context
pub struct WeeklyOptimizer {
    config: WeeklyConfig,
}

impl WeeklyOptimizer {
    /// Create an optimizer with the given balancing configuration
    #[must_use]
    pub const fn new(config: WeeklyConfig) -> Self {
        Self { config }
    }

    /// Variety score in [0,1] for a candidate against the running context.
    ///
    /// Starts at 1 and is reduced by cuisine repetition, protein repetition,
    /// and an exact-repeat veto; overlap with already-used ingredients earns
    /// back a small bonus (shared staples reduce shopping effort).
    #[must_use]
    pub fn variety_score(&self, recipe: &LibraryRecipe, ctx: &WeeklyContext) -> f64 {
        let mut penalty = 0.0_f64;

        if let Some(cuisine) = &recipe.cuisine {
            let prior_uses = ctx
                .cuisine_counts
                .get(&cuisine.to_lowercase())
                .copied()
                .unwrap_or(0);
            penalty += (CUISINE_REPEAT_PENALTY * f64::from(prior_uses)).min(CUISINE_PENALTY_CAP);
        }

        if let Some(protein) = primary_protein(recipe) {
            let prior_uses = ctx.protein_counts.get(protein).copied().unwrap_or(0);
            if prior_uses == 1 {
                penalty += PROTEIN_SECOND_USE_PENALTY;
            } else if prior_uses >= 2 {
                penalty += PROTEIN_THIRD_USE_PENALTY;
            }
        }

        if ctx.used_recipe_ids.contains(&recipe.id) {
            penalty += EXACT_REPEAT_PENALTY;
        }

        if !ctx.used_ingredients.is_empty() && !recipe.ingredients.is_empty() {
            let names = normalizer::normalized_name_set(recipe.ingredient_names());
            let overlap = names.intersection(&ctx.used_ingredients).count();
            let overlap_ratio = overlap as f64 / names.len().max(1) as f64;
            penalty -= overlap_ratio * INGREDIENT_OVERLAP_BONUS_CAP;
        }

        (1.0 - penalty).clamp(0.0, 1.0)
    }

    /// Effort score in [0,1]: how close the running average effort per slot
    /// (including this candidate) stays to the target. Deviation at or past
    /// the target yields 0.
    #[must_use]
    pub fn effort_score(&self, recipe: &LibraryRecipe, ctx: &WeeklyContext) -> f64 {
        let candidate_effort = f64::from(recipe.total_time_mins());
        let running_avg = (f64::from(ctx.total_effort_mins) + candidate_effort)
            / f64::from(ctx.slots_planned + 1);

        let deviation = (running_avg - self.config.target_effort_mins).abs();
        (1.0 - deviation / self.config.target_effort_mins).max(0.0)
    }

    /// Re-weight already-ranked candidates against the weekly context.
    ///
    /// The variety/effort blend maps linearly onto the configured multiplier
    /// range, is applied to each composite score (clamped back to [0,1]),
    /// and the list is re-sorted.
    #[must_use]
    pub fn adjust(
        &self,
        mut candidates: Vec<RankedCandidate>,
        ctx: &WeeklyContext,
    ) -> Vec<RankedCandidate> {
        let span = self.config.multiplier_ceiling - self.config.multiplier_floor;

        for candidate in &mut candidates {
            let variety = self.variety_score(&candidate.recipe, ctx);
            let effort = self.effort_score(&candidate.recipe, ctx);
            let blend =
                variety * self.config.variety_weight + effort * self.config.effort_weight;

            let multiplier = self.config.multiplier_floor + blend * span;
            candidate.composite = (candidate.composite * multiplier).clamp(0.0, 1.0);
        }

        candidates.sort_by(|a, b| {
            b.composite
                .partial_cmp(&a.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates
    }

    /// Record a committed slot into the context.
    pub fn update_context(ctx: &mut WeeklyContext, recipe: &LibraryRecipe) {
        ctx.used_recipe_ids.insert(recipe.id);

        if let Some(cuisine) = &recipe.cuisine {
            *ctx.cuisine_counts.entry(cuisine.to_lowercase()).or_insert(0) += 1;
        }

        if let Some(protein) = primary_protein(recipe) {
            *ctx.protein_counts.entry(protein.to_owned()).or_insert(0) += 1;
        }

        ctx.used_ingredients
            .extend(normalizer::normalized_name_set(recipe.ingredient_names()));

        ctx.total_effort_mins = ctx.total_effort_mins.saturating_add(recipe.total_time_mins());
        ctx.slots_planned += 1;
    }
}
