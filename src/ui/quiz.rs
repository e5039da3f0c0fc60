//! Quiz view: one question at a time, then the results

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{centered_rect, key_hints, wrap_styled};
use crate::app::quiz::QuizRun;
use crate::study::{Question, StudyData};
use crate::theme::Theme;

/// Draw the quiz as a centered panel
pub fn draw(frame: &mut Frame, area: Rect, study: &StudyData, quiz: &QuizRun, theme: &Theme) {
    let panel = centered_rect(80, 90, area);

    let title = if quiz.show_results { " Quiz Results " } else { " Quiz " };
    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(format!(" {} ", study.topic)).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    if quiz.show_results {
        draw_results(frame, inner, study.quiz.len(), quiz, theme);
    } else if let Some(question) = study.quiz.get(quiz.current) {
        draw_question(frame, inner, question, study.quiz.len(), quiz, theme);
    }
}

fn draw_results(frame: &mut Frame, area: Rect, total: usize, quiz: &QuizRun, theme: &Theme) {
    let percentage = quiz.percentage(total);
    let color = if percentage >= 80 {
        theme.success
    } else if percentage >= 50 {
        theme.warning
    } else {
        theme.error
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", percentage),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} of {} correct", quiz.score, total),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
    ];

    let mut strip = Vec::with_capacity(quiz.outcomes.len());
    for (i, correct) in quiz.outcomes.iter().enumerate() {
        let (marker, style) = if *correct {
            ("\u{2713}", Style::default().fg(theme.success)) // ✓
        } else {
            ("\u{2717}", Style::default().fg(theme.error)) // ✗
        };
        strip.push(Span::styled(format!(" Q{}{} ", i + 1, marker), style));
    }
    lines.push(Line::from(strip));
    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(key_hints(&[("r", "Restart"), ("h", "Home")], theme));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    total: usize,
    quiz: &QuizRun,
    theme: &Theme,
) {
    let width = area.width.saturating_sub(2) as usize;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" Question {} of {}  ", quiz.current + 1, total),
            Style::default().fg(theme.fg_muted),
        ),
        Span::styled(
            question.difficulty.label(),
            Style::default().fg(theme.difficulty_color(question.difficulty)),
        ),
    ])];
    lines.push(Line::from(""));

    let prompt = Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD);
    lines.extend(wrap_styled(&question.question, width, " ", " ", prompt));
    lines.push(Line::from(""));

    let correct = question.correct_index();
    for (i, option) in question.options.iter().enumerate() {
        let is_selected = quiz.selected == Some(i);
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = (b'A' + (i as u8 % 26)) as char;

        let (suffix, style) = if quiz.answered && correct == Some(i) {
            (" \u{2713}", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
        } else if quiz.answered && is_selected {
            (" \u{2717}", Style::default().fg(theme.error))
        } else if is_selected {
            ("", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
        } else {
            ("", Style::default().fg(theme.fg_secondary))
        };

        let text = format!("{} {}) {}{}", prefix, letter, option, suffix);
        lines.extend(wrap_styled(&text, width, "   ", "      ", style));
    }
    lines.push(Line::from(""));

    if quiz.answered {
        let was_right = quiz.outcomes.last().copied().unwrap_or(false);
        let (verdict, color) =
            if was_right { ("Correct!", theme.success) } else { ("Not quite.", theme.error) };
        lines.push(Line::from(Span::styled(
            format!(" {}", verdict),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(wrap_styled(
            &question.explanation,
            width,
            " ",
            " ",
            Style::default().fg(theme.fg_primary),
        ));
        lines.push(Line::from(""));
        let next = if quiz.is_last(total) { "See results" } else { "Next question" };
        lines.push(key_hints(&[("Enter", next)], theme));
    } else {
        lines.push(key_hints(
            &[("j/k", "Select"), ("1-9", "Pick"), ("Enter", "Confirm"), ("x", "Exit")],
            theme,
        ));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
