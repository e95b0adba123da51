// ABOUTME: Caller-supplied inventory items used for coverage scoring
// ABOUTME: Defines the InventoryItemLike shape owned by the persistence layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use serde::{Deserialize, Serialize};

/// An item from the caller's pantry inventory
///
/// Supplied per request; the engine never owns or mutates inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Ingredient name as entered by the user
    pub name: String,
    /// Free-form quantity string ("500g", "half a bag"), if tracked
    pub quantity: Option<String>,
}

impl InventoryItem {
    /// Create an item with a quantity
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity.into()),
        }
    }

    /// Create an item with no quantity
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
        }
    }
}
