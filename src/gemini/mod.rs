//! Gemini API integration module
//!
//! Provides API key management, the HTTP client, request/response models and
//! the response schema used for structured generation.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod schema;

// Re-export commonly used types
pub use auth::{ApiKeyManager, KeySource};
pub use client::GeminiClient;
pub use error::GeminiError;
pub use models::{GeminiModel, GenerateContentRequest, GenerateContentResponse};
