// ABOUTME: In-memory reference implementations of the library and taste stores
// ABOUTME: RwLock-backed maps used by the test suite and embedded deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use async_trait::async_trait;
use chrono::{Duration, Utc};
use remy_core::errors::{AppError, AppResult};
use remy_core::models::{InteractionSignal, LibraryRecipe, MealType, Provenance, RecipeDraft};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::{InsertedRecipe, LibraryStore, TasteStore, UserTasteProfile};
use crate::intelligence::normalizer;

fn lock_poisoned() -> AppError {
    AppError::internal("store lock poisoned")
}

// ============================================================================
// Library store
// ============================================================================

#[derive(Debug, Default)]
struct LibraryInner {
    recipes: HashMap<Uuid, LibraryRecipe>,
    // Insertion order, oldest first; drives sample_recent
    order: Vec<Uuid>,
}

/// In-memory recipe library
#[derive(Debug, Default)]
pub struct InMemoryLibraryStore {
    inner: RwLock<LibraryInner>,
}

impl InMemoryLibraryStore {
    /// Create an empty library
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a recipe, computing its signature when absent.
    ///
    /// # Errors
    ///
    /// Fails only if the store lock is poisoned.
    pub fn seed(&self, mut recipe: LibraryRecipe) -> AppResult<Uuid> {
        if recipe.signature.is_empty() {
            recipe.signature = normalizer::signature(recipe.ingredient_names());
        }

        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let id = recipe.id;
        inner.order.push(id);
        inner.recipes.insert(id, recipe);
        Ok(id)
    }

    /// Drop every stored recipe.
    ///
    /// # Errors
    ///
    /// Fails only if the store lock is poisoned.
    pub fn clear(&self) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        inner.recipes.clear();
        inner.order.clear();
        Ok(())
    }

    /// Number of stored recipes.
    ///
    /// # Errors
    ///
    /// Fails only if the store lock is poisoned.
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.inner.read().map_err(|_| lock_poisoned())?.recipes.len())
    }

    /// Whether the library is empty.
    ///
    /// # Errors
    ///
    /// Fails only if the store lock is poisoned.
    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl LibraryStore for InMemoryLibraryStore {
    async fn fetch_candidates(
        &self,
        meal_type: Option<MealType>,
        max_total_minutes: Option<u32>,
        must_include: Option<&str>,
        limit: usize,
    ) -> AppResult<Vec<LibraryRecipe>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;

        let wanted = must_include.map(normalizer::normalize);

        let candidates = inner
            .order
            .iter()
            .filter_map(|id| inner.recipes.get(id))
            .filter(|r| meal_type.is_none_or(|mt| r.meal_type == mt))
            .filter(|r| max_total_minutes.is_none_or(|max| r.total_time_mins() <= max))
            .filter(|r| {
                wanted.as_ref().is_none_or(|w| {
                    r.ingredient_names()
                        .any(|name| normalizer::normalize(name) == *w)
                })
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(candidates)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<LibraryRecipe>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.recipes.get(&id).cloned())
    }

    async fn insert(&self, draft: &RecipeDraft) -> AppResult<InsertedRecipe> {
        let recipe = draft.clone().into_recipe(Uuid::new_v4(), Provenance::Generated);
        let signature = recipe.signature.clone();
        let id = self.seed(recipe)?;
        Ok(InsertedRecipe { id, signature })
    }

    async fn increment_usage(&self, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let recipe = inner
            .recipes
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("recipe").with_resource_id(id.to_string()))?;
        recipe.usage_count += 1;
        recipe.updated_at = Utc::now();
        Ok(())
    }

    async fn record_feedback(&self, id: Uuid, thumbs_up: bool) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let recipe = inner
            .recipes
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("recipe").with_resource_id(id.to_string()))?;
        if thumbs_up {
            recipe.thumbs_up += 1;
        } else {
            recipe.thumbs_down += 1;
        }
        recipe.updated_at = Utc::now();
        Ok(())
    }

    async fn sample_recent(&self, limit: usize) -> AppResult<Vec<LibraryRecipe>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| inner.recipes.get(id))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Taste store
// ============================================================================

#[derive(Debug, Default)]
struct TasteInner {
    profiles: HashMap<Uuid, UserTasteProfile>,
    recipe_embeddings: HashMap<Uuid, Vec<f64>>,
    interactions: Vec<InteractionSignal>,
}

/// In-memory taste profiles and interaction log
#[derive(Debug, Default)]
pub struct InMemoryTasteStore {
    inner: RwLock<TasteInner>,
}

impl InMemoryTasteStore {
    /// Create an empty taste store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total interactions recorded across all users.
    ///
    /// # Errors
    ///
    /// Fails only if the store lock is poisoned.
    pub fn interaction_count(&self) -> AppResult<usize> {
        Ok(self
            .inner
            .read()
            .map_err(|_| lock_poisoned())?
            .interactions
            .len())
    }
}

#[async_trait]
impl TasteStore for InMemoryTasteStore {
    async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserTasteProfile>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.profiles.get(&user_id).cloned())
    }

    async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        embedding: &[f64],
        increment_interaction: bool,
    ) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let profile = inner
            .profiles
            .entry(user_id)
            .or_insert_with(|| UserTasteProfile {
                embedding: Vec::new(),
                interaction_count: 0,
            });
        profile.embedding = embedding.to_vec();
        if increment_interaction {
            profile.interaction_count += 1;
        }
        Ok(())
    }

    async fn get_recipe_embedding(&self, recipe_id: Uuid) -> AppResult<Option<Vec<f64>>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.recipe_embeddings.get(&recipe_id).cloned())
    }

    async fn upsert_recipe_embedding(&self, recipe_id: Uuid, embedding: &[f64]) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        inner.recipe_embeddings.insert(recipe_id, embedding.to_vec());
        Ok(())
    }

    async fn count_recent_interactions(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        window_days: i64,
    ) -> AppResult<u64> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        let cutoff = Utc::now() - Duration::days(window_days);

        Ok(inner
            .interactions
            .iter()
            .filter(|s| {
                s.user_id == user_id && s.recipe_id == recipe_id && s.timestamp >= cutoff
            })
            .count() as u64)
    }

    async fn record_interaction(&self, signal: &InteractionSignal) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        inner.interactions.push(signal.clone());
        Ok(())
    }
}
