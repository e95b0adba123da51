// ABOUTME: Main library entry point for the Remy meal-plan engine
// ABOUTME: Recipe reuse/ranking/variety engine with taste feedback and generation fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

#![deny(unsafe_code)]

//! # Remy Engine
//!
//! The reuse/ranking/variety engine behind the Remy cooking assistant. For a
//! requested meal slot it decides whether a previously produced recipe can be
//! served from the shared library or whether a new one must be generated by
//! the external content-generation service, and it organizes reuse across a
//! seven-day, three-meal plan so selections stay varied and effort-balanced.
//!
//! ## Architecture
//!
//! - [`intelligence::normalizer`]: ingredient-name canonicalization and set similarity
//! - [`intelligence::scoring`]: multi-factor composite candidate scoring
//! - [`intelligence::taste`]: 26-axis taste embeddings with EMA feedback updates
//! - [`intelligence::reuse`]: the threshold gate between reuse and generation
//! - [`intelligence::weekly`]: variety/effort re-weighting across 21 plan slots
//! - [`stores`]: collaborator traits for the recipe library and taste profiles
//! - [`llm`]: the external structured-generation service boundary
//! - [`services`]: the orchestrator and the caller-facing [`services::RecipeService`]
//!
//! Everything outside this engine (mobile UI, CRUD persistence endpoints,
//! authentication, HTTP transport) is an external collaborator reached
//! through the traits in [`stores`] and [`llm`].

/// Engine configuration structs with documented defaults
pub mod config;

/// Scoring, taste, reuse, and weekly-variety algorithms
pub mod intelligence;

/// External structured-generation service boundary
pub mod llm;

/// Orchestration services and the caller-facing engine façade
pub mod services;

/// Collaborator store traits and in-memory reference implementations
pub mod stores;

pub use remy_core::errors::{AppError, AppResult, ErrorCode};
pub use remy_core::models;
