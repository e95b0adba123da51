// ABOUTME: Ingredient-name canonicalization and set-similarity metrics
// ABOUTME: normalize, signature fingerprinting, and Jaccard over normalized names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! Ingredient-name normalization.
//!
//! Every ingredient-derived set operation in the engine runs on normalized
//! names so that `"Tomatoes"` and `"tomato"` collide. Normalization is
//! deterministic and idempotent: normalizing an already-normalized string
//! returns it unchanged.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Minimum length for the `...ies` -> `...y` singularization rule
const IES_RULE_MIN_LEN: usize = 5;

/// Minimum length for the `...es` -> drop-2 singularization rule
const ES_RULE_MIN_LEN: usize = 5;

/// Minimum length for the trailing-`s` drop-1 singularization rule
const S_RULE_MIN_LEN: usize = 4;

static PARENTHETICAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").ok());

/// Canonicalize a free-text ingredient name.
///
/// Lowercases, strips parenthetical asides, strips punctuation, collapses
/// whitespace, then applies a conservative singularization that only touches
/// strings longer than each rule's minimum length to avoid mangling short
/// words.
#[must_use]
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();

    let without_parens = PARENTHETICAL.as_ref().map_or_else(
        || lowered.clone(),
        |re| re.replace_all(&lowered, " ").into_owned(),
    );

    let cleaned: String = without_parens
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    singularize(&collapsed)
}

/// Conservative singular form of an already-cleaned name.
fn singularize(name: &str) -> String {
    let len = name.chars().count();

    if len >= IES_RULE_MIN_LEN {
        if let Some(stem) = name.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }

    if len >= ES_RULE_MIN_LEN {
        if let Some(stem) = name.strip_suffix("es") {
            // "...sses" and friends keep their double-s stem intact
            return stem.to_owned();
        }
    }

    if len >= S_RULE_MIN_LEN && name.ends_with('s') && !name.ends_with("ss") {
        return name[..name.len() - 1].to_owned();
    }

    name.to_owned()
}

/// Sorted, normalized, pipe-joined ingredient names.
///
/// Used as a cheap equality fingerprint for near-identical recipes.
#[must_use]
pub fn signature<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique: BTreeSet<String> = names
        .into_iter()
        .map(|n| normalize(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect();

    unique.into_iter().collect::<Vec<_>>().join("|")
}

/// Build a normalized-name set, dropping entries that normalize to empty.
#[must_use]
pub fn normalized_name_set<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| normalize(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect()
}

/// Jaccard similarity between two normalized-name sets.
///
/// Defined as 1.0 when both sets are empty and 0.0 when exactly one is.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    intersection as f64 / union as f64
}
