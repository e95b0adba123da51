// ABOUTME: Reqwest client for OpenAI-compatible structured generation endpoints
// ABOUTME: Explicitly constructed and injected; no global client cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Kitchen Intelligence

use async_trait::async_trait;
use remy_core::errors::{AppError, AppResult, ErrorCode};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tracing::{debug, info};

use super::prompts::RECIPE_SYSTEM_PROMPT;
use super::GenerativeService;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Environment variable for the generation endpoint base URL
const GENERATION_BASE_URL_ENV: &str = "REMY_GENERATION_BASE_URL";

/// Environment variable for the generation model
const GENERATION_MODEL_ENV: &str = "REMY_GENERATION_MODEL";

/// Environment variable for the generation API key
const GENERATION_API_KEY_ENV: &str = "REMY_GENERATION_API_KEY";

/// Default base URL (local Ollama)
const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model
const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout (generation can be slow)
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Sampling temperature; recipes want some variety but parseable structure
const GENERATION_TEMPERATURE: f64 = 0.7;

// ============================================================================
// API response types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Configuration for the generation client
#[derive(Debug, Clone)]
pub struct GenerationClientConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// API key, if the endpoint requires one
    pub api_key: Option<String>,
    /// Model to request
    pub model: String,
}

impl Default for GenerationClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
        }
    }
}

/// Structured-generation client for any OpenAI-compatible chat endpoint.
///
/// Built once at process start and injected into the orchestrator.
pub struct GenerationClient {
    client: Client,
    config: GenerationClientConfig,
}

impl GenerationClient {
    /// Create a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: GenerationClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// Reads `REMY_GENERATION_BASE_URL`, `REMY_GENERATION_MODEL`, and
    /// `REMY_GENERATION_API_KEY`, with local-Ollama defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_env() -> AppResult<Self> {
        let config = GenerationClientConfig {
            base_url: env::var(GENERATION_BASE_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            model: env::var(GENERATION_MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_owned()),
            api_key: env::var(GENERATION_API_KEY_ENV).ok().filter(|k| !k.is_empty()),
        };

        info!(
            "Initializing generation client: base_url={}, model={}",
            config.base_url, config.model
        );

        Self::new(config)
    }

    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
            |_| {
                AppError::external_service(
                    "generation",
                    format!("API error ({status}): {body}"),
                )
            },
            |parsed| match status.as_u16() {
                429 => AppError::new(ErrorCode::ExternalRateLimited, parsed.error.message),
                503 => AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    parsed.error.message,
                ),
                _ => AppError::external_service("generation", parsed.error.message),
            },
        )
    }
}

#[async_trait]
impl GenerativeService for GenerationClient {
    async fn generate_structured(&self, prompt: &str, image: Option<&str>) -> AppResult<Value> {
        let user_content = image.map_or_else(
            || json!(prompt),
            |data_url| {
                json!([
                    {"type": "text", "text": prompt},
                    {"type": "image_url", "image_url": {"url": data_url}},
                ])
            },
        );

        let body = json!({
            "model": self.config.model,
            "temperature": GENERATION_TEMPERATURE,
            "messages": [
                {"role": "system", "content": RECIPE_SYSTEM_PROMPT},
                {"role": "user", "content": user_content},
            ],
        });

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            has_image = image.is_some(),
            "sending generation request"
        );

        let mut request = self.client.post(self.api_url()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::external_service("generation", format!("request failed: {e}")).with_source(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service("generation", format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }

        let parsed: ApiResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::invalid_format(format!("unexpected generation response shape: {e}"))
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| AppError::invalid_format("generation response had no content"))?;

        extract_json_payload(content)
    }
}

/// Extract the JSON payload from generated text.
///
/// Tolerates markdown code fences and leading prose; the payload is the
/// first top-level JSON object or array in the text.
///
/// # Errors
///
/// Fails when the text contains no parseable JSON.
pub fn extract_json_payload(text: &str) -> AppResult<Value> {
    let trimmed = text.trim();

    // Fast path: the whole response is already JSON
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    // Strip a ```json ... ``` fence if present
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.rsplit_once("```"))
        .map(|(inner, _)| inner.trim());

    if let Some(inner) = unfenced {
        if let Ok(value) = serde_json::from_str::<Value>(inner) {
            return Ok(value);
        }
    }

    // Last resort: scan for the outermost object or array
    let start = trimmed.find(['{', '[']);
    let end = trimmed.rfind(['}', ']']);
    if let (Some(start), Some(end)) = (start, end) {
        if end > start {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(AppError::invalid_format(
        "generation output contained no parseable JSON",
    ))
}
