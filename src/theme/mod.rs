//! Theming system for SmartTutor

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::study::{Difficulty, InsightKind};

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
}

impl Theme {
    /// Look a theme up by its display name
    pub fn by_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("tokyo night") || name.eq_ignore_ascii_case("tokyo-night") {
            Some(Theme::tokyo_night())
        } else {
            None
        }
    }

    /// Callout color for a lesson insight
    pub fn insight_color(&self, kind: InsightKind) -> Color {
        match kind {
            InsightKind::Tip => self.success,
            InsightKind::Warning => self.warning,
            InsightKind::Fact => self.info,
        }
    }

    /// Badge color for a question difficulty
    pub fn difficulty_color(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Easy => self.success,
            Difficulty::Medium => self.warning,
            Difficulty::Hard => self.error,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
