// ABOUTME: Reuse gate deciding between library reuse and fresh generation
// ABOUTME: Pure threshold rule over the top-ranked candidate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! The reuse gate.
//!
//! A pure decision rule over a ranked candidate list: the top candidate is
//! served from the library only when its composite score and its
//! missing-ingredient count both clear fixed thresholds. Everything else
//! falls through to the generation path.

use crate::config::ScoringConfig;
use crate::intelligence::scoring::RankedCandidate;

/// Decide whether the top-ranked candidate should be reused.
///
/// Reuse iff the composite score meets the threshold AND the missing
/// ingredient count is within the limit. No candidate means never reuse.
#[must_use]
pub fn should_reuse(top: Option<&RankedCandidate>, config: &ScoringConfig) -> bool {
    top.is_some_and(|candidate| {
        candidate.composite >= config.reuse_score_threshold
            && candidate.missing_ingredients.len() <= config.reuse_missing_limit
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use remy_core::models::{LibraryRecipe, MealType};

    fn candidate(composite: f64, missing: usize) -> RankedCandidate {
        RankedCandidate {
            recipe: LibraryRecipe::new("Test", MealType::Dinner),
            coverage: 1.0,
            missing_ingredients: vec![String::from("x"); missing],
            preference_score: 0.5,
            quality_score: 0.5,
            taste_similarity: 0.5,
            novelty: 0.5,
            composite,
        }
    }

    #[test]
    fn empty_list_never_reuses() {
        assert!(!should_reuse(None, &ScoringConfig::default()));
    }

    #[test]
    fn low_score_fails_gate() {
        let c = candidate(0.77, 0);
        assert!(!should_reuse(Some(&c), &ScoringConfig::default()));
    }

    #[test]
    fn too_many_missing_fails_gate() {
        let c = candidate(0.9, 4);
        assert!(!should_reuse(Some(&c), &ScoringConfig::default()));
    }

    #[test]
    fn threshold_boundaries_pass_gate() {
        let c = candidate(0.78, 3);
        assert!(should_reuse(Some(&c), &ScoringConfig::default()));
    }
}
