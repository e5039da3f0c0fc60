//! Turning extracted text into [`StudyData`] with one Gemini call

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::model::StudyData;
use super::prompt::build_prompt;
use crate::config::Config;
use crate::gemini::schema::study_data_schema;
use crate::gemini::{GeminiClient, GeminiError, GenerateContentRequest};

/// Generation failures, displayed verbatim in the error banner
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(
        "No Gemini API key is configured. Set GEMINI_API_KEY in the environment \
         or store one with `smart-tutor key set <KEY>`."
    )]
    MissingApiKey,

    #[error("The Gemini API key was rejected. Check that the key is valid and enabled.")]
    Unauthorized,

    #[error("Too many requests right now. Please wait {retry_after_seconds} seconds and try again.")]
    RateLimited { retry_after_seconds: u64 },

    #[error("The model returned an empty response. Please try again.")]
    EmptyResponse,

    #[error("The curriculum could not be built from the model's answer: {0}")]
    Malformed(String),

    #[error("Generation was cancelled.")]
    Cancelled,

    #[error("The model took too long to answer. Please try again.")]
    TimedOut,

    #[error("Something went wrong: {0}")]
    Other(String),
}

impl From<GeminiError> for GenerationError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::ApiKeyNotFound => Self::MissingApiKey,
            GeminiError::Unauthorized | GeminiError::InvalidApiKey => Self::Unauthorized,
            GeminiError::RateLimited { retry_after_seconds } => {
                Self::RateLimited { retry_after_seconds }
            }
            GeminiError::EmptyResponse { .. } => Self::EmptyResponse,
            GeminiError::JsonError(e) => Self::Malformed(e.to_string()),
            GeminiError::Cancelled => Self::Cancelled,
            GeminiError::TimedOut => Self::TimedOut,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Matches a Markdown code fence wrapped around the whole response
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[a-zA-Z]*\s*\n(.*?)\n?```$").expect("valid regex"));

/// Parse the model's text into study data and enforce its invariants
///
/// Questions whose correct answer is not one of their options are dropped;
/// an empty lesson list or quiz afterwards is an error.
pub fn parse_study_data(text: &str) -> Result<StudyData, GenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let json = CODE_FENCE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map_or(trimmed, |m| m.as_str());

    let mut data =
        StudyData::from_json(json).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if data.lessons.is_empty() {
        return Err(GenerationError::Malformed("no lessons were generated".to_string()));
    }

    let before = data.quiz.len();
    data.quiz.retain(|q| {
        let keep = q.is_well_formed();
        if !keep {
            tracing::warn!("Dropping question {}: correct answer is not among its options", q.id);
        }
        keep
    });
    if data.quiz.is_empty() {
        return Err(GenerationError::Malformed(format!(
            "none of the {before} quiz questions had a valid answer"
        )));
    }

    Ok(data)
}

/// Builds study data for a document through the Gemini API
pub struct StudyGenerator {
    config: Config,
    api_key: Option<String>,
    base_url: Option<String>,
}

impl StudyGenerator {
    /// Create a generator; a `None` or blank key fails every call up front
    pub fn new(config: Config, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self { config, api_key, base_url: None }
    }

    /// Send requests to a different Gemini endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the request for a document
    pub fn build_request(&self, text: &str) -> GenerateContentRequest {
        let prompt =
            build_prompt(text, self.config.max_prompt_chars, &self.config.lesson_language);
        GenerateContentRequest::new(self.config.model, prompt).with_json_schema(study_data_schema())
    }

    /// Generate a curriculum for `text`; makes at most one request, no retries
    pub async fn generate(
        &self,
        text: &str,
        cancel_token: CancellationToken,
    ) -> Result<StudyData, GenerationError> {
        let Some(api_key) = self.api_key.clone() else {
            tracing::warn!("Generation requested without an API key");
            return Err(GenerationError::MissingApiKey);
        };

        let mut client = GeminiClient::new(api_key, self.config.request_timeout())?;
        if let Some(base_url) = &self.base_url {
            client = client.with_base_url(base_url.as_str());
        }

        let request = self.build_request(text);
        tracing::info!(
            "Generating curriculum with {} from {} characters",
            self.config.model.display_name(),
            text.chars().count()
        );

        let response =
            client.generate_content_cancellable(&request, cancel_token).await.map_err(|e| {
                if e.requires_reauth() {
                    tracing::warn!("Gemini rejected the API key: {}", e);
                } else if e.is_recoverable() {
                    tracing::info!("Generation stopped: {}", e);
                } else {
                    tracing::error!("Gemini request failed: {}", e);
                }
                GenerationError::from(e)
            })?;
        let Some(body) = response.first_text() else {
            tracing::warn!("Empty generation response: {:?}", response.empty_reason());
            return Err(GenerationError::EmptyResponse);
        };

        let data = parse_study_data(&body)?;
        tracing::info!(
            "Generated \"{}\": {} lessons, {} questions",
            data.topic,
            data.lessons.len(),
            data.quiz.len()
        );
        Ok(data)
    }
}
