// ABOUTME: Generation orchestrator: prompt, invoke, validate, dedup, persist
// ABOUTME: Converts loose generation JSON into strict drafts at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Generation orchestration.
//!
//! On a reuse-gate miss this module builds the prompt, invokes the external
//! generation service, validates its output into strict [`RecipeDraft`]s,
//! checks near-duplication against a bounded recent slice of the library,
//! and persists accepted drafts with `generated` provenance.
//!
//! The duplicate check samples only the most recent library entries rather
//! than scanning all records; a known scalability approximation carried
//! over from the original design.

use remy_core::errors::{AppError, AppResult};
use remy_core::models::{
    InventoryItem, LibraryRecipe, Provenance, RecipeDraft, RecipePreferences, UserContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::intelligence::normalizer;
use crate::llm::{prompts, GenerativeService};
use crate::stores::LibraryStore;

/// A generated recipe and whether it was persisted to the library
#[derive(Debug, Clone)]
pub struct GeneratedRecipe {
    /// The generated recipe; carries the library id when persisted, a
    /// locally generated id when rejected as a near-duplicate
    pub recipe: LibraryRecipe,
    /// Whether the recipe entered the library
    pub persisted: bool,
}

/// Sequences prompt building, generation, validation, dedup, and persistence
pub struct GenerationOrchestrator {
    service: Arc<dyn GenerativeService>,
    library: Arc<dyn LibraryStore>,
    config: GenerationConfig,
}

impl GenerationOrchestrator {
    /// Create an orchestrator over a generation service and the library
    #[must_use]
    pub fn new(
        service: Arc<dyn GenerativeService>,
        library: Arc<dyn LibraryStore>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            service,
            library,
            config,
        }
    }

    /// Generate recipes for one slot.
    ///
    /// # Errors
    ///
    /// Fails when the generation service fails, when its output contains no
    /// structurally valid recipe, or when a library write fails. Callers
    /// planning a whole week treat a failure as an empty slot.
    pub async fn generate_for_slot(
        &self,
        inventory: &[InventoryItem],
        user: &UserContext,
        prefs: &RecipePreferences,
    ) -> AppResult<Vec<GeneratedRecipe>> {
        let prompt = prompts::build_recipe_prompt(inventory, user, prefs);
        let output = self.service.generate_structured(&prompt, None).await?;

        let drafts = Self::parse_drafts(&output, prefs)?;

        let mut generated = Vec::with_capacity(drafts.len());
        for draft in drafts {
            generated.push(self.dedup_and_persist(draft).await?);
        }

        Ok(generated)
    }

    /// Validate loose generation JSON into strict drafts.
    ///
    /// Accepts `{"recipes": [...]}`, a bare array, or a single recipe
    /// object. Entries that fail structural validation are skipped with a
    /// warning; an output with no valid entry is a generation failure.
    fn parse_drafts(output: &Value, prefs: &RecipePreferences) -> AppResult<Vec<RecipeDraft>> {
        let entries: Vec<&Value> = if let Some(recipes) = output.get("recipes").and_then(Value::as_array) {
            recipes.iter().collect()
        } else if let Some(array) = output.as_array() {
            array.iter().collect()
        } else {
            vec![output]
        };

        let mut drafts = Vec::new();
        for entry in entries {
            match Self::validate_draft(entry, prefs) {
                Ok(draft) => drafts.push(draft),
                Err(e) => warn!(error = %e, "skipping structurally invalid generated recipe"),
            }
        }

        if drafts.is_empty() {
            return Err(AppError::invalid_format(
                "generation output contained no valid recipe",
            ));
        }

        Ok(drafts)
    }

    fn validate_draft(entry: &Value, prefs: &RecipePreferences) -> AppResult<RecipeDraft> {
        let mut draft: RecipeDraft = serde_json::from_value(entry.clone())?;

        if draft.title.trim().is_empty() {
            return Err(AppError::invalid_format("generated recipe has no title"));
        }
        if draft.ingredients.is_empty() {
            return Err(AppError::invalid_format(
                "generated recipe has no ingredients",
            ));
        }
        if draft.instructions.is_empty() {
            return Err(AppError::invalid_format(
                "generated recipe has no instructions",
            ));
        }

        // The request's meal type wins over whatever the service labeled
        if let Some(meal_type) = prefs.meal_type {
            draft.meal_type = meal_type;
        }

        draft.signature = normalizer::signature(draft.ingredients.iter().map(|i| &i.name));
        Ok(draft)
    }

    /// Reject near-duplicates against a bounded recent slice, else persist.
    async fn dedup_and_persist(&self, draft: RecipeDraft) -> AppResult<GeneratedRecipe> {
        let new_names = normalizer::normalized_name_set(draft.ingredients.iter().map(|i| &i.name));

        let recent = self.library.sample_recent(self.config.dedup_sample_size).await?;
        for existing in &recent {
            let existing_names = normalizer::normalized_name_set(existing.ingredient_names());
            let similarity = normalizer::jaccard(&new_names, &existing_names);

            if similarity > self.config.dedup_similarity_threshold {
                debug!(
                    title = %draft.title,
                    existing_id = %existing.id,
                    similarity,
                    "generated recipe rejected as near-duplicate; returning unpersisted"
                );
                return Ok(GeneratedRecipe {
                    recipe: draft.into_recipe(Uuid::new_v4(), Provenance::Generated),
                    persisted: false,
                });
            }
        }

        let inserted = self.library.insert(&draft).await?;
        debug!(id = %inserted.id, title = %draft.title, "generated recipe persisted");

        Ok(GeneratedRecipe {
            recipe: draft.into_recipe(inserted.id, Provenance::Generated),
            persisted: true,
        })
    }
}
