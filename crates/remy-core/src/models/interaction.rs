// ABOUTME: Interaction signals driving taste-embedding updates and novelty
// ABOUTME: Defines InteractionSignal and SignalKind with per-kind EMA weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of user interaction with a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// The user cooked the recipe
    Cooked,
    /// The user skipped the recipe when offered
    Skipped,
    /// Explicit thumbs-up
    ThumbsUp,
    /// Explicit thumbs-down
    ThumbsDown,
    /// The user cooked the recipe again
    Repeated,
    /// The user edited the recipe before cooking
    Edited,
}

impl SignalKind {
    /// Signed EMA weight for this signal
    ///
    /// The magnitude is the EMA alpha; the sign is the direction the user's
    /// taste embedding moves relative to the recipe embedding.
    #[must_use]
    pub const fn signed_weight(&self) -> f64 {
        match self {
            Self::Cooked => 0.15,
            Self::Repeated => 0.20,
            Self::ThumbsUp => 0.25,
            Self::ThumbsDown => -0.20,
            Self::Skipped => -0.05,
            Self::Edited => 0.08,
        }
    }

    /// Whether this signal maps onto the library's thumbs counters
    #[must_use]
    pub const fn as_thumbs(&self) -> Option<bool> {
        match self {
            Self::ThumbsUp => Some(true),
            Self::ThumbsDown => Some(false),
            _ => None,
        }
    }
}

/// A single user-recipe interaction, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSignal {
    /// User who interacted
    pub user_id: Uuid,
    /// Recipe interacted with
    pub recipe_id: Uuid,
    /// Kind of interaction
    pub kind: SignalKind,
    /// Optional free-form metadata (edit diff, skip reason, ...)
    pub metadata: Option<serde_json::Value>,
    /// When the interaction happened
    pub timestamp: DateTime<Utc>,
}

impl InteractionSignal {
    /// Create a signal stamped now
    #[must_use]
    pub fn new(user_id: Uuid, recipe_id: Uuid, kind: SignalKind) -> Self {
        Self {
            user_id,
            recipe_id,
            kind,
            metadata: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
