// ABOUTME: Caller-facing engine façade sequencing reuse, generation, and plans
// ABOUTME: Single-slot suggestions, 21-slot weekly plans, interaction signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! The recipe service façade.
//!
//! Sequences the engine per slot and across a whole week:
//! fetch candidates → rank → (weekly) variety/effort adjust → reuse gate →
//! reuse path (detached usage increment) or generate path (orchestrator →
//! library insert).
//!
//! Weekly plans run as 21 strictly sequential slot decisions because every
//! slot reads and mutates the shared [`WeeklyContext`]; sequencing is a
//! correctness requirement, not an implementation convenience.

use remy_core::errors::{AppError, AppResult};
use remy_core::models::{
    DayPlan, InteractionSignal, InventoryItem, LibraryRecipe, MealSlot, PlannedMeal,
    RecipePreferences, RecipeResponse, ServingMode, SuggestedRecipe, UserContext, WeeklyMealPlan,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::intelligence::reuse;
use crate::intelligence::scoring::{RankedCandidate, ScoringEngine};
use crate::intelligence::taste::TasteEngine;
use crate::intelligence::weekly::{WeeklyContext, WeeklyOptimizer};
use crate::llm::GenerativeService;
use crate::services::generation::GenerationOrchestrator;
use crate::stores::{LibraryStore, TasteStore};

/// The caller-facing engine façade
pub struct RecipeService {
    library: Arc<dyn LibraryStore>,
    taste: Arc<TasteEngine>,
    scoring: ScoringEngine,
    optimizer: WeeklyOptimizer,
    orchestrator: GenerationOrchestrator,
    candidate_limit: usize,
}

impl RecipeService {
    /// Wire the engine together from its collaborators and configuration.
    #[must_use]
    pub fn new(
        library: Arc<dyn LibraryStore>,
        taste_store: Arc<dyn TasteStore>,
        generative: Arc<dyn GenerativeService>,
        config: EngineConfig,
    ) -> Self {
        let taste = Arc::new(TasteEngine::new(taste_store));
        let scoring = ScoringEngine::new(config.scoring.clone(), Arc::clone(&taste));
        let optimizer = WeeklyOptimizer::new(config.weekly.clone());
        let orchestrator = GenerationOrchestrator::new(
            generative,
            Arc::clone(&library),
            config.generation.clone(),
        );

        Self {
            library,
            taste,
            scoring,
            optimizer,
            orchestrator,
            candidate_limit: config.generation.candidate_limit,
        }
    }

    /// Rank the given candidates for this request.
    ///
    /// # Errors
    ///
    /// Propagates taste-store failures.
    pub async fn rank_and_maybe_reuse(
        &self,
        candidates: Vec<LibraryRecipe>,
        inventory: &[InventoryItem],
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> AppResult<Vec<RankedCandidate>> {
        self.scoring
            .rank_candidates(candidates, inventory, user, prefs)
            .await
    }

    /// Whether the top-ranked candidate clears the reuse gate.
    #[must_use]
    pub fn should_reuse(&self, top: Option<&RankedCandidate>) -> bool {
        reuse::should_reuse(top, self.scoring.config())
    }

    /// Serve one slot: reuse the best library match or generate fresh.
    ///
    /// # Errors
    ///
    /// Propagates store failures and, on the generate path, generation
    /// failures. A usage-increment failure never fails this call.
    pub async fn generate_recipes_from_inventory(
        &self,
        inventory: &[InventoryItem],
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> AppResult<RecipeResponse> {
        let candidates = self
            .library
            .fetch_candidates(
                prefs.meal_type,
                prefs.max_minutes.or(user.max_cooking_minutes),
                prefs.must_include.as_deref(),
                self.candidate_limit,
            )
            .await?;

        let ranked = self
            .scoring
            .rank_candidates(candidates, inventory, user, prefs)
            .await?;

        if self.should_reuse(ranked.first()) {
            if let Some(top) = ranked.into_iter().next() {
                debug!(
                    recipe_id = %top.recipe.id,
                    match_score = top.match_score(),
                    "reuse gate passed; serving library recipe"
                );
                self.spawn_usage_increment(top.recipe.id);
                return Ok(RecipeResponse {
                    mode: ServingMode::Reuse,
                    recipes: vec![SuggestedRecipe {
                        match_score: Some(top.match_score()),
                        recipe: top.recipe,
                    }],
                });
            }
        }

        let generated = self
            .orchestrator
            .generate_for_slot(inventory, user, prefs)
            .await?;

        Ok(RecipeResponse {
            mode: ServingMode::Generate,
            recipes: generated
                .into_iter()
                .map(|g| SuggestedRecipe {
                    recipe: g.recipe,
                    match_score: None,
                })
                .collect(),
        })
    }

    /// Plan a full week: seven days, three meals each.
    ///
    /// Slots are decided strictly sequentially over one mutable
    /// [`WeeklyContext`]. A slot with no satisfiable recipe is left empty
    /// and never blocks the rest of the plan.
    ///
    /// # Errors
    ///
    /// Propagates library failures on the initial candidate fetches;
    /// per-slot generation failures only empty that slot.
    pub async fn generate_weekly_meal_plan(
        &self,
        inventory: &[InventoryItem],
        user: &UserContext,
    ) -> AppResult<WeeklyMealPlan> {
        let mut ctx = WeeklyContext::new();
        let mut days = Vec::with_capacity(WeeklyMealPlan::DAY_NAMES.len());

        for day_name in WeeklyMealPlan::DAY_NAMES {
            let mut day = DayPlan::empty(day_name);
            for slot in MealSlot::ALL {
                let meal = self.plan_slot(slot, inventory, user, &mut ctx).await;
                day.set_slot(slot, meal);
            }
            days.push(day);
        }

        Ok(WeeklyMealPlan { days })
    }

    /// Decide one weekly slot; failures empty the slot instead of aborting
    /// the plan.
    async fn plan_slot(
        &self,
        slot: MealSlot,
        inventory: &[InventoryItem],
        user: &UserContext,
        ctx: &mut WeeklyContext,
    ) -> Option<PlannedMeal> {
        match self.fill_slot(slot, inventory, user, ctx).await {
            Ok(meal) => meal,
            Err(e) => {
                warn!(slot = ?slot, error = %e, "slot left empty after failure");
                None
            }
        }
    }

    async fn fill_slot(
        &self,
        slot: MealSlot,
        inventory: &[InventoryItem],
        user: &UserContext,
        ctx: &mut WeeklyContext,
    ) -> AppResult<Option<PlannedMeal>> {
        let prefs = RecipePreferences {
            meal_type: Some(slot.meal_type()),
            servings: user.household_size,
            ..RecipePreferences::default()
        };

        let candidates = self
            .library
            .fetch_candidates(
                Some(slot.meal_type()),
                user.max_cooking_minutes,
                None,
                self.candidate_limit,
            )
            .await?;

        let ranked = self
            .scoring
            .rank_candidates(candidates, inventory, user, &prefs)
            .await?;

        let adjusted = self.optimizer.adjust(ranked, ctx);

        // The gate only sees candidates not already committed this week
        let mut eligible: Vec<RankedCandidate> = adjusted
            .into_iter()
            .filter(|c| !ctx.used_recipe_ids.contains(&c.recipe.id))
            .collect();

        if self.should_reuse(eligible.first()) {
            let top = eligible.remove(0);
            self.spawn_usage_increment(top.recipe.id);
            WeeklyOptimizer::update_context(ctx, &top.recipe);
            return Ok(Some(PlannedMeal {
                match_score: Some(top.match_score()),
                mode: ServingMode::Reuse,
                recipe: top.recipe,
            }));
        }

        let generated = self
            .orchestrator
            .generate_for_slot(inventory, user, &prefs)
            .await?;

        Ok(generated.into_iter().next().map(|g| {
            WeeklyOptimizer::update_context(ctx, &g.recipe);
            PlannedMeal {
                recipe: g.recipe,
                match_score: None,
                mode: ServingMode::Generate,
            }
        }))
    }

    /// Record a user interaction: append to the log, update the taste
    /// profile, and forward thumbs signals to the library counters.
    ///
    /// # Errors
    ///
    /// Propagates store failures and unknown recipe ids. The library
    /// feedback counter update is detached and never fails this call.
    pub async fn apply_interaction_signal(&self, signal: InteractionSignal) -> AppResult<()> {
        self.taste.store().record_interaction(&signal).await?;

        let recipe = self
            .library
            .get(signal.recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("recipe").with_resource_id(signal.recipe_id.to_string())
            })?;

        self.taste.apply_signal(&signal, &recipe).await?;

        if let Some(thumbs_up) = signal.kind.as_thumbs() {
            let library = Arc::clone(&self.library);
            let recipe_id = signal.recipe_id;
            tokio::spawn(async move {
                if let Err(e) = library.record_feedback(recipe_id, thumbs_up).await {
                    warn!(recipe_id = %recipe_id, error = %e, "thumbs feedback not recorded");
                }
            });
        }

        Ok(())
    }

    /// Detached best-effort usage increment; bookkeeping never blocks or
    /// fails the primary request.
    fn spawn_usage_increment(&self, recipe_id: Uuid) {
        let library = Arc::clone(&self.library);
        tokio::spawn(async move {
            if let Err(e) = library.increment_usage(recipe_id).await {
                warn!(recipe_id = %recipe_id, error = %e, "usage increment not recorded");
            }
        });
    }
}
