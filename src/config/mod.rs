// ABOUTME: Engine configuration structs with documented defaults
// ABOUTME: Scoring weights, reuse thresholds, weekly balancing, generation dedup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Engine configuration.
//!
//! One [`EngineConfig`] value is constructed at process start and passed by
//! reference into the engine constructors. There is no global singleton;
//! deployments that need different thresholds build a different value.

use remy_core::constants::{generation, reuse, scoring, taste, weekly};
use serde::{Deserialize, Serialize};

/// Weights for the five composite scoring factors
///
/// Weights are not required to sum to 1; the composite is clamped to [0,1]
/// regardless.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for inventory coverage
    pub coverage: f64,
    /// Weight for explicit preference matching
    pub preference: f64,
    /// Weight for library quality
    pub quality: f64,
    /// Weight for taste-embedding similarity
    pub taste: f64,
    /// Weight for the novelty bonus
    pub novelty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            coverage: scoring::COVERAGE_WEIGHT,
            preference: scoring::PREFERENCE_WEIGHT,
            quality: scoring::QUALITY_WEIGHT,
            taste: scoring::TASTE_WEIGHT,
            novelty: scoring::NOVELTY_WEIGHT,
        }
    }
}

/// Scoring and reuse-gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Composite factor weights
    pub weights: ScoringWeights,
    /// Minimum composite score for reuse
    pub reuse_score_threshold: f64,
    /// Maximum missing-ingredient count for reuse
    pub reuse_missing_limit: usize,
    /// Minimum recorded interactions before taste similarity applies
    pub min_interactions_for_taste: u64,
    /// Trailing window for novelty interaction counting, in days
    pub novelty_window_days: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            reuse_score_threshold: reuse::MIN_COMPOSITE_SCORE,
            reuse_missing_limit: reuse::MAX_MISSING_INGREDIENTS,
            min_interactions_for_taste: taste::MIN_INTERACTIONS_FOR_TASTE,
            novelty_window_days: taste::NOVELTY_WINDOW_DAYS,
        }
    }
}

/// Weekly plan variety/effort balancing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyConfig {
    /// Target cooking effort per slot in minutes
    pub target_effort_mins: f64,
    /// Weight of variety in the multiplier blend
    pub variety_weight: f64,
    /// Weight of effort balance in the multiplier blend
    pub effort_weight: f64,
    /// Lower bound of the composite multiplier
    pub multiplier_floor: f64,
    /// Upper bound of the composite multiplier
    pub multiplier_ceiling: f64,
}

impl Default for WeeklyConfig {
    fn default() -> Self {
        Self {
            target_effort_mins: weekly::TARGET_EFFORT_MINS,
            variety_weight: weekly::VARIETY_WEIGHT,
            effort_weight: weekly::EFFORT_WEIGHT,
            multiplier_floor: weekly::MULTIPLIER_FLOOR,
            multiplier_ceiling: weekly::MULTIPLIER_CEILING,
        }
    }
}

/// Generation and near-duplicate detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Bounded recent-library slice sampled for duplicate checks
    pub dedup_sample_size: usize,
    /// Jaccard similarity above which a generated recipe is rejected
    pub dedup_similarity_threshold: f64,
    /// Candidates fetched from the library per slot
    pub candidate_limit: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            dedup_sample_size: generation::DEDUP_SAMPLE_SIZE,
            dedup_similarity_threshold: generation::DEDUP_SIMILARITY_THRESHOLD,
            candidate_limit: generation::CANDIDATE_LIMIT,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scoring and reuse-gate settings
    pub scoring: ScoringConfig,
    /// Weekly balancing settings
    pub weekly: WeeklyConfig,
    /// Generation and dedup settings
    pub generation: GenerationConfig,
}
