//! Lesson walkthrough view

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::layout::{draw_scroll_indicator, key_hints, wrap_styled};
use crate::app::walkthrough::Walkthrough;
use crate::study::{Lesson, StudyData};
use crate::theme::Theme;

/// Draw the current lesson; returns the largest useful scroll offset
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    study: &StudyData,
    walkthrough: &Walkthrough,
    theme: &Theme,
) -> u16 {
    let [header, body, footer] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3), Constraint::Length(2)])
            .areas(area);

    draw_header(frame, header, study, walkthrough, theme);

    let Some(lesson) = study.lessons.get(walkthrough.current()) else {
        return 0;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .padding(Padding::horizontal(1));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let lines = lesson_lines(lesson, inner.width.saturating_sub(1) as usize, theme);
    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    let scroll = (walkthrough.scroll as usize).min(max_scroll);

    let para = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(para, inner);
    draw_scroll_indicator(frame, body, scroll, max_scroll, theme);

    let next_label = if walkthrough.is_last() { "Finish & start quiz" } else { "Next" };
    let mut hints = Vec::with_capacity(4);
    if !walkthrough.is_first() {
        hints.push(("h", "Previous"));
    }
    hints.push(("l", next_label));
    hints.push(("j/k", "Scroll"));
    hints.push(("x", "Exit"));
    frame.render_widget(Paragraph::new(key_hints(&hints, theme)), footer);

    u16::try_from(max_scroll).unwrap_or(u16::MAX)
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    study: &StudyData,
    walkthrough: &Walkthrough,
    theme: &Theme,
) {
    let mut markers = Vec::with_capacity(walkthrough.total() + 1);
    for i in 0..walkthrough.total() {
        let (symbol, color) = match i.cmp(&walkthrough.current()) {
            std::cmp::Ordering::Less => ("● ", theme.success),
            std::cmp::Ordering::Equal => ("● ", theme.accent_primary),
            std::cmp::Ordering::Greater => ("○ ", theme.fg_muted),
        };
        markers.push(Span::styled(symbol, Style::default().fg(color)));
    }
    markers.push(Span::styled(
        format!(" Lesson {} of {}", walkthrough.current() + 1, walkthrough.total()),
        Style::default().fg(theme.fg_muted),
    ));

    let lines = vec![
        Line::from(Span::styled(
            study.topic.clone(),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            study.learning_path_goal.clone(),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(markers),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render a lesson into pre-wrapped lines
pub fn lesson_lines(lesson: &Lesson, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let heading = Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD);
    let body = Style::default().fg(theme.fg_primary);

    let mut lines = wrap_styled(&lesson.title, width, "", "", heading);
    lines.push(Line::from(""));

    for insight in &lesson.insights {
        let style = Style::default().fg(theme.insight_color(insight.kind));
        let text = format!("{}: {}", insight.kind.label(), insight.text);
        lines.extend(wrap_styled(&text, width, "▌ ", "▌ ", style));
        lines.push(Line::from(""));
    }

    let summary = Style::default().fg(theme.fg_secondary).add_modifier(Modifier::ITALIC);
    lines.extend(wrap_styled(&lesson.summary, width, "", "", summary));
    lines.push(Line::from(""));

    for paragraph in lesson.paragraphs() {
        lines.extend(wrap_styled(paragraph, width, "", "", body));
        lines.push(Line::from(""));
    }

    if !lesson.key_points.is_empty() {
        lines.push(Line::from(Span::styled("Key points", heading)));
        for point in &lesson.key_points {
            lines.extend(wrap_styled(point, width, "• ", "  ", body));
        }
        lines.push(Line::from(""));
    }

    if !lesson.notes.is_empty() {
        lines.push(Line::from(Span::styled("Deep dive", heading)));
        let muted = Style::default().fg(theme.fg_secondary);
        for note in &lesson.notes {
            lines.extend(wrap_styled(note, width, "› ", "  ", muted));
        }
    }

    lines
}
