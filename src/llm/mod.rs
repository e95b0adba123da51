// ABOUTME: External structured-generation service boundary
// ABOUTME: GenerativeService trait, reqwest client, and prompt builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

//! # Generation Service Boundary
//!
//! The engine invokes an expensive external content-generation service when
//! the reuse gate misses. This module defines the narrow [`GenerativeService`]
//! trait the orchestrator depends on, a reqwest-based client for any
//! OpenAI-compatible chat-completions endpoint, and the prompt builders.
//!
//! The client is constructed once at process start and passed by reference
//! into the orchestrator; there is no global client cache.

use async_trait::async_trait;
use remy_core::errors::AppResult;
use serde_json::Value;

/// Prompt builders for single-slot and weekly generation requests
pub mod prompts;

mod client;

pub use client::{extract_json_payload, GenerationClient, GenerationClientConfig};

/// External content-generation service.
///
/// One call per slot; failures and malformed output surface immediately as
/// hard errors — the engine never retries internally, and any retry policy
/// belongs to the transport layer.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Generate structured recipe JSON for a prompt.
    ///
    /// `image` optionally carries a base64 data URL for services that accept
    /// a photo of the user's pantry alongside the prompt.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and on output that is not parseable JSON.
    async fn generate_structured(&self, prompt: &str, image: Option<&str>) -> AppResult<Value>;
}
