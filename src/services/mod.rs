// ABOUTME: Orchestration services sequencing scoring, gating, and generation
// ABOUTME: Re-exports the GenerationOrchestrator and the RecipeService façade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

/// Generation orchestration: prompt, invoke, validate, dedup, persist
pub mod generation;

/// The caller-facing engine façade
pub mod meal_plan;

pub use generation::{GeneratedRecipe, GenerationOrchestrator};
pub use meal_plan::RecipeService;
