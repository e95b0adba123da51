// ABOUTME: Engine-wide constants and default thresholds organized by domain
// ABOUTME: Scoring weights, reuse gate limits, weekly plan targets, taste axes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Engine constants organized by domain.
//!
//! These are the documented defaults consumed by the engine configuration
//! structs; deployments override them through explicit config injection,
//! never by patching constants.

/// Composite scoring defaults
pub mod scoring {
    /// Default weight for inventory coverage in the composite score
    pub const COVERAGE_WEIGHT: f64 = 0.40;

    /// Default weight for explicit preference matching
    pub const PREFERENCE_WEIGHT: f64 = 0.15;

    /// Default weight for library quality score
    pub const QUALITY_WEIGHT: f64 = 0.20;

    /// Default weight for taste-embedding similarity
    pub const TASTE_WEIGHT: f64 = 0.15;

    /// Default weight for the novelty bonus
    pub const NOVELTY_WEIGHT: f64 = 0.10;

    /// Baseline quality when a recipe carries no stored quality score
    pub const QUALITY_BASELINE: f64 = 0.55;

    /// Span of the upvote-ratio feedback adjustment around neutral
    pub const FEEDBACK_ADJUST_SPAN: f64 = 0.2;

    /// Cap on the absolute feedback adjustment
    pub const FEEDBACK_ADJUST_CAP: f64 = 0.1;

    /// Cap on the usage-confidence adjustment
    pub const USAGE_CONFIDENCE_CAP: f64 = 0.05;

    /// Scale applied to `log10(usage_count + 1)` for usage confidence
    pub const USAGE_CONFIDENCE_SCALE: f64 = 0.03;

    /// Neutral score substituted when a factor cannot be computed
    pub const NEUTRAL_SCORE: f64 = 0.5;

    /// Partial credit for a cuisine that misses a non-empty preference list
    pub const CUISINE_PARTIAL_CREDIT: f64 = 0.4;
}

/// Reuse gate thresholds
pub mod reuse {
    /// Minimum composite score for a library recipe to be reused
    pub const MIN_COMPOSITE_SCORE: f64 = 0.78;

    /// Maximum missing-ingredient count tolerated for reuse
    pub const MAX_MISSING_INGREDIENTS: usize = 3;
}

/// Weekly plan variety and effort balancing
pub mod weekly {
    /// Days covered by one plan
    pub const PLAN_DAYS: usize = 7;

    /// Target cooking effort per slot in minutes
    pub const TARGET_EFFORT_MINS: f64 = 35.0;

    /// Weight of the variety score in the slot multiplier blend
    pub const VARIETY_WEIGHT: f64 = 0.6;

    /// Weight of the effort score in the slot multiplier blend
    pub const EFFORT_WEIGHT: f64 = 0.4;

    /// Lower bound of the composite-score multiplier
    pub const MULTIPLIER_FLOOR: f64 = 0.5;

    /// Upper bound of the composite-score multiplier
    pub const MULTIPLIER_CEILING: f64 = 1.2;

    /// Penalty added per prior use of the same cuisine
    pub const CUISINE_REPEAT_PENALTY: f64 = 0.15;

    /// Cap on the accumulated cuisine penalty
    pub const CUISINE_PENALTY_CAP: f64 = 0.5;

    /// Penalty for the second use of the same primary protein
    pub const PROTEIN_SECOND_USE_PENALTY: f64 = 0.1;

    /// Penalty for the third and later uses of the same primary protein
    pub const PROTEIN_THIRD_USE_PENALTY: f64 = 0.3;

    /// Penalty for a recipe already used this week (an effective veto)
    pub const EXACT_REPEAT_PENALTY: f64 = 1.0;

    /// Cap on the ingredient-overlap bonus subtracted from the penalty
    pub const INGREDIENT_OVERLAP_BONUS_CAP: f64 = 0.2;
}

/// Taste embedding axes and thresholds
pub mod taste {
    /// Fixed dimensionality of taste embeddings
    pub const EMBEDDING_DIM: usize = 26;

    /// Minimum recorded interactions before taste similarity applies
    pub const MIN_INTERACTIONS_FOR_TASTE: u64 = 3;

    /// Trailing window for novelty interaction counting, in days
    pub const NOVELTY_WINDOW_DAYS: i64 = 30;

    /// Total minutes at or under which a recipe is a quick meal
    pub const QUICK_MEAL_MINS: u32 = 20;

    /// Total minutes at or under which a recipe is a medium meal
    pub const MEDIUM_MEAL_MINS: u32 = 45;

    /// Ingredient count at or under which a recipe reinforces "simple"
    pub const SIMPLE_INGREDIENT_COUNT: usize = 5;

    /// Ingredient count at or over which a recipe reinforces "complex"
    pub const COMPLEX_INGREDIENT_COUNT: usize = 12;
}

/// Generation and deduplication
pub mod generation {
    /// Bounded recent-library slice sampled for near-duplicate checks
    pub const DEDUP_SAMPLE_SIZE: usize = 30;

    /// Jaccard similarity above which a generated recipe is a duplicate
    pub const DEDUP_SIMILARITY_THRESHOLD: f64 = 0.85;

    /// Candidates fetched from the library per slot
    pub const CANDIDATE_LIMIT: usize = 40;
}
