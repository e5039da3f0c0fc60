//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner frame for the given tick (advances every 4 frames)
pub fn spinner(tick: u64) -> char {
    SPINNER[((tick / 4) % SPINNER.len() as u64) as usize]
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// `[key] label` pairs rendered as one hint line
pub fn key_hints(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, label)) in hints.iter().enumerate() {
        let label = if i + 1 < hints.len() { format!(" {}  ", label) } else { format!(" {}", label) };
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(label, Style::default().fg(theme.fg_secondary)));
    }
    Line::from(spans)
}

/// Wrap `text` to `width` columns with the given indents
pub fn wrap_styled(
    text: &str,
    width: usize,
    first_indent: &str,
    rest_indent: &str,
    style: Style,
) -> Vec<Line<'static>> {
    let options =
        textwrap::Options::new(width.max(8)).initial_indent(first_indent).subsequent_indent(rest_indent);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| Line::from(Span::styled(line.into_owned(), style)))
        .collect()
}

/// Draw a thumb on the right edge showing the scroll position
pub fn draw_scroll_indicator(
    frame: &mut Frame,
    area: Rect,
    scroll: usize,
    max_scroll: usize,
    theme: &Theme,
) {
    if area.height < 3 || max_scroll == 0 {
        return;
    }

    let track_height = area.height.saturating_sub(2) as usize;
    let thumb_pos = (scroll * track_height) / max_scroll;

    let thumb_y = area.y + 1 + thumb_pos as u16;
    let thumb_x = area.x + area.width - 1;

    if thumb_y < area.y + area.height - 1 {
        let thumb = Paragraph::new("█").style(Style::default().fg(theme.fg_muted));
        frame.render_widget(thumb, Rect::new(thumb_x, thumb_y, 1, 1));
    }
}

/// Popup asking whether to abandon the current session
pub fn draw_confirm_exit(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Leave session? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your lessons and quiz progress will be lost.",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        key_hints(&[("y", "Leave"), ("n", "Stay")], theme).alignment(Alignment::Center),
    ];
    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

const HELP: &[(&str, &str)] = &[
    ("o / :open <path>", "Open a PDF"),
    ("Esc", "Cancel generation, dismiss messages"),
    ("l / Enter", "Next lesson"),
    ("h", "Previous lesson"),
    ("j / k", "Scroll lesson, move answer selection"),
    ("1-9", "Pick an answer"),
    ("Enter", "Confirm answer, continue"),
    ("r", "Restart from the results screen"),
    ("H", "Home"),
    ("x", "Leave the session"),
    (":key <key>", "Store a Gemini API key"),
    (":model <name>", "flash, flash25, lite or pro"),
    (":q", "Quit"),
];

/// Key reference popup
pub fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Keys ")
        .title_bottom(Line::from(" any key to close ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let key_width = HELP.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$}  ", key, width = key_width),
                    Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(theme.fg_primary)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 50, parent);
        assert!(popup.x >= 25 && popup.right() <= 75);
        assert!(popup.y >= 12 && popup.bottom() <= 38);
    }

    #[test]
    fn spinner_cycles() {
        assert_eq!(spinner(0), spinner(40));
        assert_ne!(spinner(0), spinner(4));
    }

    #[test]
    fn wrap_applies_indents() {
        let lines = wrap_styled("one two three four five six", 12, "• ", "  ", Style::default());
        assert!(lines.len() > 1);
        assert!(lines[0].spans[0].content.starts_with("• "));
        assert!(lines[1].spans[0].content.starts_with("  "));
    }

    #[test]
    fn hints_pair_keys_with_labels() {
        let theme = Theme::default();
        let line = key_hints(&[("r", "Restart"), ("h", "Home")], &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[r] Restart  [h] Home");
    }
}
