//! Data models for Gemini API requests and responses

use serde::{Deserialize, Serialize};

/// Available Gemini models
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 3 Flash preview - fast, structured output
    #[default]
    Flash3Preview,
    /// Gemini 2.5 Flash - stable fast model
    Flash25,
    /// Gemini 2.5 Flash-Lite - cheapest
    FlashLite25,
    /// Gemini 2.5 Pro - most capable
    Pro25,
}

impl GeminiModel {
    /// Get the API model identifier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Flash3Preview => "gemini-3-flash-preview",
            Self::Flash25 => "gemini-2.5-flash",
            Self::FlashLite25 => "gemini-2.5-flash-lite",
            Self::Pro25 => "gemini-2.5-pro",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Flash3Preview => "Gemini 3 Flash (preview)",
            Self::Flash25 => "Gemini 2.5 Flash",
            Self::FlashLite25 => "Gemini 2.5 Flash-Lite",
            Self::Pro25 => "Gemini 2.5 Pro",
        }
    }

    /// Parse model from a short name or a model ID
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flash" | "flash3" | "gemini-3-flash-preview" => Some(Self::Flash3Preview),
            "flash25" | "flash2.5" | "gemini-2.5-flash" => Some(Self::Flash25),
            "lite" | "flash-lite" | "gemini-2.5-flash-lite" => Some(Self::FlashLite25),
            "pro" | "pro25" | "gemini-2.5-pro" => Some(Self::Pro25),
            _ => None,
        }
    }

    /// List all available models
    pub fn all() -> &'static [GeminiModel] {
        &[Self::Flash3Preview, Self::Flash25, Self::FlashLite25, Self::Pro25]
    }
}

impl std::str::FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::all().iter().map(GeminiModel::model_id).collect();
            format!("Unknown model: {}. Options: {}", s, known.join(", "))
        })
    }
}

/// A text part of a content block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// A content block (one conversation turn)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn holding a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Some("user".to_string()), parts: vec![Part { text: Some(text.into()) }] }
    }
}

/// Output constraints for generation
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Model identifier, sent in the URL rather than the body
    #[serde(skip)]
    pub model: String,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Create a single-turn request with default settings
    pub fn new(model: GeminiModel, prompt: impl Into<String>) -> Self {
        Self {
            model: model.model_id().to_string(),
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig::default(),
        }
    }

    /// Constrain the response to JSON matching `schema`
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation_config.response_mime_type = Some("application/json".to_string());
        self.generation_config.response_schema = Some(schema);
        self
    }
}

/// A generated candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Prompt-level feedback (set when the prompt itself was blocked)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

/// Response from `generateContent`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }

    /// Why no text was produced, as reported by the API
    pub fn empty_reason(&self) -> Option<String> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .or_else(|| self.candidates.first().and_then(|c| c.finish_reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_parse() {
        assert_eq!(GeminiModel::parse("flash"), Some(GeminiModel::Flash3Preview));
        assert_eq!(GeminiModel::parse("PRO"), Some(GeminiModel::Pro25));
        assert_eq!(GeminiModel::parse("gemini-2.5-flash"), Some(GeminiModel::Flash25));
        assert_eq!(GeminiModel::parse("lite"), Some(GeminiModel::FlashLite25));
        assert_eq!(GeminiModel::parse("unknown"), None);
    }

    #[test]
    fn every_model_id_round_trips_through_parse() {
        for model in GeminiModel::all() {
            assert_eq!(GeminiModel::parse(model.model_id()), Some(*model));
        }
    }

    #[test]
    fn unknown_model_error_lists_choices() {
        let err = "gpt".parse::<GeminiModel>().unwrap_err();
        assert!(err.starts_with("Unknown model: gpt."));
        assert!(err.contains("gemini-2.5-flash-lite"));
        assert!(err.contains("gemini-2.5-pro"));
    }

    #[test]
    fn request_serializes_generation_config() {
        let request = GenerateContentRequest::new(GeminiModel::Flash25, "Hello")
            .with_json_schema(json!({"type": "OBJECT"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(value.get("model").is_none());
    }

    #[test]
    fn response_first_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text().as_deref(), Some("{\"a\":1}"));
        assert_eq!(response.usage_metadata.unwrap().candidates_token_count, 4);
    }

    #[test]
    fn blocked_prompt_has_no_text() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), None);
        assert_eq!(response.empty_reason().as_deref(), Some("SAFETY"));
    }
}
