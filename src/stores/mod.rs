// ABOUTME: Collaborator store boundaries for the recipe library and taste data
// ABOUTME: Async traits implemented by the persistence layer outside this core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Store boundaries.
//!
//! The engine depends on persistence only through these narrow traits. The
//! surrounding platform implements them on its database; the in-memory
//! implementations in [`memory`] back the test suite and embedded
//! deployments. Stores are responsible for their own concurrency control
//! (counter increments must be atomic and idempotent-safe); the engine
//! itself holds no locks.

use async_trait::async_trait;
use remy_core::errors::AppResult;
use remy_core::models::{InteractionSignal, LibraryRecipe, MealType, RecipeDraft};
use uuid::Uuid;

/// In-memory reference implementations of the store traits
pub mod memory;

pub use memory::{InMemoryLibraryStore, InMemoryTasteStore};

/// Result of inserting a generated recipe into the library
#[derive(Debug, Clone)]
pub struct InsertedRecipe {
    /// Assigned library id
    pub id: Uuid,
    /// Ingredient signature stored with the record
    pub signature: String,
}

/// A user's stored taste profile
#[derive(Debug, Clone)]
pub struct UserTasteProfile {
    /// EMA-updated taste embedding
    pub embedding: Vec<f64>,
    /// Total recorded interactions for this user
    pub interaction_count: u64,
}

/// Persistent recipe library queried for reuse candidates
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Fetch reuse candidates for a slot.
    ///
    /// Filters by meal type (when given), maximum total minutes (when
    /// given), and a must-include ingredient (when given), returning at
    /// most `limit` recipes.
    async fn fetch_candidates(
        &self,
        meal_type: Option<MealType>,
        max_total_minutes: Option<u32>,
        must_include: Option<&str>,
        limit: usize,
    ) -> AppResult<Vec<LibraryRecipe>>;

    /// Fetch a single recipe by id
    async fn get(&self, id: Uuid) -> AppResult<Option<LibraryRecipe>>;

    /// Insert a validated draft; the draft's signature is stored verbatim
    async fn insert(&self, draft: &RecipeDraft) -> AppResult<InsertedRecipe>;

    /// Increment a recipe's usage counter (monotonic, atomic)
    async fn increment_usage(&self, id: Uuid) -> AppResult<()>;

    /// Bump a recipe's thumbs-up or thumbs-down counter (monotonic, atomic)
    async fn record_feedback(&self, id: Uuid, thumbs_up: bool) -> AppResult<()>;

    /// A bounded slice of the most recently inserted recipes, newest first
    async fn sample_recent(&self, limit: usize) -> AppResult<Vec<LibraryRecipe>>;
}

/// Persistent taste embeddings and interaction history
#[async_trait]
pub trait TasteStore: Send + Sync {
    /// Fetch a user's taste profile, if one exists
    async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserTasteProfile>>;

    /// Upsert a user's embedding, optionally incrementing the interaction counter
    async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        embedding: &[f64],
        increment_interaction: bool,
    ) -> AppResult<()>;

    /// Fetch a cached recipe embedding
    async fn get_recipe_embedding(&self, recipe_id: Uuid) -> AppResult<Option<Vec<f64>>>;

    /// Cache a computed recipe embedding
    async fn upsert_recipe_embedding(&self, recipe_id: Uuid, embedding: &[f64]) -> AppResult<()>;

    /// Count this user's interactions with this recipe inside a trailing window
    async fn count_recent_interactions(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        window_days: i64,
    ) -> AppResult<u64>;

    /// Append an interaction to the log
    async fn record_interaction(&self, signal: &InteractionSignal) -> AppResult<()>;
}
