//! HTTP client for the Gemini API

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;

use super::error::GeminiError;
use super::models::{GenerateContentRequest, GenerateContentResponse};

/// Gemini API client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL up to and including `/models`
    base_url: String,
}

impl GeminiClient {
    /// Gemini API models endpoint
    const API_BASE: &'static str = "https://generativelanguage.googleapis.com/v1beta/models";

    /// Create a new client with the given API key and request timeout
    pub fn new(api_key: String, timeout: Option<Duration>) -> Result<Self, GeminiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, api_key, base_url: Self::API_BASE.to_string() })
    }

    /// Point the client at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }

    /// Send a generation request and return the parsed response
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        tracing::debug!("Sending generateContent request to {}", request.model);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(GeminiError::RateLimited { retry_after_seconds: retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &body));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::info!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Generation complete"
            );
        }
        Ok(parsed)
    }

    /// Like [`generate_content`](Self::generate_content), but returns
    /// `Cancelled` as soon as `cancel_token` fires
    pub async fn generate_content_cancellable(
        &self,
        request: &GenerateContentRequest,
        cancel_token: CancellationToken,
    ) -> Result<GenerateContentResponse, GeminiError> {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => Err(GeminiError::Cancelled),
            result = self.generate_content(request) => result,
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> GeminiError {
    if e.is_timeout() { GeminiError::TimedOut } else { GeminiError::RequestError(e) }
}

/// Map a non-success, non-429 response to an error
fn classify_error(status: u16, body: &str) -> GeminiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    // Gemini reports a bad key as 400 INVALID_ARGUMENT with reason API_KEY_INVALID
    let key_rejected = body.contains("API_KEY_INVALID") || message.contains("API key not valid");

    if status == 401 || status == 403 || key_rejected {
        GeminiError::Unauthorized
    } else {
        GeminiError::ApiError { status, message }
    }
}
