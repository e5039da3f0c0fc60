//! SmartTutor - turn a PDF into a lesson walkthrough and a quiz
//!
//! Text is extracted from the document, sent once to Gemini for a structured
//! curriculum, and then studied lesson by lesson in the terminal before a
//! scored multiple-choice quiz.

pub mod app;
pub mod config;
pub mod gemini;
pub mod pdf;
pub mod study;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
