// ABOUTME: Core types and constants for the Remy meal-plan engine
// ABOUTME: Foundation crate with error handling, domain models, and scoring constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

#![deny(unsafe_code)]

//! # Remy Core
//!
//! Foundation crate providing shared types and constants for the Remy
//! meal-plan engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Engine-wide constants organized by domain
//! - **models**: Domain models (`LibraryRecipe`, `UserContext`, `InteractionSignal`, plan types)

/// Unified error handling system with standard error codes
pub mod errors;

/// Engine constants and default thresholds organized by domain
pub mod constants;

/// Core domain models (recipes, inventory, users, interactions, plans)
pub mod models;
