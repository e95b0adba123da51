// ABOUTME: Algorithmic core of the engine: normalization, scoring, taste, variety
// ABOUTME: Re-exports the ranked-candidate type and the per-subsystem modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Algorithmic core of the meal-plan engine.
//!
//! Modules are layered leaves-first: [`normalizer`] has no dependencies,
//! [`taste`] depends on the taste store boundary, [`scoring`] composes both,
//! [`reuse`] is a pure decision rule over ranked output, and [`weekly`]
//! re-weights ranked output against the plan-scoped context.

/// Ingredient-name canonicalization, signatures, and set similarity
pub mod normalizer;

/// Reuse-or-generate threshold gate
pub mod reuse;

/// Multi-factor composite candidate scoring
pub mod scoring;

/// Taste embeddings: rule-based encoding, EMA updates, similarity
pub mod taste;

/// Weekly variety and effort balancing across 21 slots
pub mod weekly;

pub use scoring::{InventoryCoverage, RankedCandidate, ScoringEngine};
pub use taste::TasteEngine;
pub use weekly::{WeeklyContext, WeeklyOptimizer};
