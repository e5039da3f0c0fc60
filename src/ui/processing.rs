//! Waiting screen shown while the curriculum is generated

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{key_hints, spinner};
use crate::app::state::AppState;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [_, body] =
        Layout::vertical([Constraint::Length(area.height / 3), Constraint::Min(0)]).areas(area);

    let source = state.intake.file_name.as_deref().unwrap_or("your document");
    let lines = vec![
        Line::from(Span::styled(
            format!("{}  Building lessons from {}", spinner(state.tick), source),
            Style::default().fg(theme.accent_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This usually takes under a minute.",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        key_hints(&[("Esc", "Cancel")], theme),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}
