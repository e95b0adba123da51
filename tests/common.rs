// ABOUTME: Shared test utilities for the engine integration tests
// ABOUTME: Seed recipe builders, scripted generation service, store fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test setup for the engine's integration tests.

use async_trait::async_trait;
use remy_engine::config::EngineConfig;
use remy_engine::llm::GenerativeService;
use remy_engine::models::{LibraryRecipe, MealType, Provenance, RecipeIngredient};
use remy_engine::services::RecipeService;
use remy_engine::stores::{InMemoryLibraryStore, InMemoryTasteStore, LibraryStore};
use remy_engine::{AppError, AppResult};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A curated breakfast/lunch/dinner recipe that covers the standard test
/// inventory and clears the reuse gate on full coverage.
pub fn qualifying_recipe(title: &str, meal_type: MealType, ingredients: &[&str]) -> LibraryRecipe {
    let mut recipe = LibraryRecipe::new(title, meal_type)
        .with_cuisine("italian")
        .with_times(15, 20)
        .with_servings(2)
        .with_provenance(Provenance::Curated)
        .with_quality_score(1.0);

    for name in ingredients {
        recipe = recipe.with_ingredient(RecipeIngredient::named(*name));
    }

    recipe
        .with_instruction("Combine everything in a pan.")
        .with_instruction("Cook until done and serve.")
}

/// Scripted generation service: returns queued JSON payloads in order and
/// fails once the queue is empty.
pub struct ScriptedGenerativeService {
    responses: Mutex<VecDeque<Value>>,
}

impl ScriptedGenerativeService {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// A service with nothing to say; every call fails.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl GenerativeService for ScriptedGenerativeService {
    async fn generate_structured(&self, _prompt: &str, _image: Option<&str>) -> AppResult<Value> {
        self.responses
            .lock()
            .map_err(|_| AppError::internal("scripted service lock poisoned"))?
            .pop_front()
            .ok_or_else(|| AppError::external_service("generation", "no scripted response left"))
    }
}

/// Library wrapper whose usage increments always fail; everything else
/// delegates to the in-memory store. Used to prove best-effort semantics.
pub struct FlakyUsageLibraryStore {
    pub inner: Arc<InMemoryLibraryStore>,
}

#[async_trait]
impl LibraryStore for FlakyUsageLibraryStore {
    async fn fetch_candidates(
        &self,
        meal_type: Option<MealType>,
        max_total_minutes: Option<u32>,
        must_include: Option<&str>,
        limit: usize,
    ) -> AppResult<Vec<LibraryRecipe>> {
        self.inner
            .fetch_candidates(meal_type, max_total_minutes, must_include, limit)
            .await
    }

    async fn get(&self, id: uuid::Uuid) -> AppResult<Option<LibraryRecipe>> {
        self.inner.get(id).await
    }

    async fn insert(
        &self,
        draft: &remy_engine::models::RecipeDraft,
    ) -> AppResult<remy_engine::stores::InsertedRecipe> {
        self.inner.insert(draft).await
    }

    async fn increment_usage(&self, _id: uuid::Uuid) -> AppResult<()> {
        Err(AppError::storage("usage counter unavailable"))
    }

    async fn record_feedback(&self, id: uuid::Uuid, thumbs_up: bool) -> AppResult<()> {
        self.inner.record_feedback(id, thumbs_up).await
    }

    async fn sample_recent(&self, limit: usize) -> AppResult<Vec<LibraryRecipe>> {
        self.inner.sample_recent(limit).await
    }
}

/// Fully wired engine over in-memory stores and a scripted service.
pub struct TestEngine {
    pub service: RecipeService,
    pub library: Arc<InMemoryLibraryStore>,
    pub taste: Arc<InMemoryTasteStore>,
}

/// Build an engine with default configuration.
pub fn build_engine(generation: ScriptedGenerativeService) -> TestEngine {
    init_test_logging();

    let library = Arc::new(InMemoryLibraryStore::new());
    let taste = Arc::new(InMemoryTasteStore::new());

    let service = RecipeService::new(
        Arc::clone(&library) as Arc<dyn LibraryStore>,
        Arc::clone(&taste) as _,
        Arc::new(generation) as _,
        EngineConfig::default(),
    );

    TestEngine {
        service,
        library,
        taste,
    }
}
