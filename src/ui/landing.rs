//! Landing screen: title, PDF intake and the generation error banner

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::{key_hints, spinner};
use crate::app::state::AppState;
use crate::theme::Theme;

const TITLE: &str = "S M A R T T U T O R";
const TAGLINE: &str = "Turn any PDF into lessons and a quiz";
const SIZE_HINT: &str = "PDF, up to 10MB";

/// Draw the landing screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let banner_height = if state.session.error().is_some() { 5 } else { 0 };
    let [banner_area, _, body] = Layout::vertical([
        Constraint::Length(banner_height),
        Constraint::Length(area.height / 5),
        Constraint::Min(0),
    ])
    .areas(area);

    if let Some(message) = state.session.error() {
        draw_banner(frame, banner_area, message, theme);
    }

    let mut lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(TAGLINE, Style::default().fg(theme.fg_secondary))),
        Line::from(""),
        Line::from(""),
    ];

    if state.intake.busy {
        let name = state.intake.file_name.as_deref().unwrap_or("file");
        lines.push(Line::from(Span::styled(
            format!("{} Reading {}...", spinner(state.tick), name),
            Style::default().fg(theme.info),
        )));
    } else {
        lines.push(key_hints(&[("o", "Open a PDF")], theme));
        lines.push(Line::from(Span::styled(SIZE_HINT, Style::default().fg(theme.fg_muted))));
    }

    if let Some(error) = &state.intake.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(theme.error))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(key_hints(&[("?", "Keys"), ("q", "Quit")], theme));

    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, body);
}

/// Dismissible error shown after a failed generation
fn draw_banner(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let block = Block::default()
        .title(" Could not build your lessons ")
        .title_bottom(Line::from(" [Enter] dismiss ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.bg_secondary));
    let para = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(theme.fg_primary)))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
