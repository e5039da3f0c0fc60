//! UI rendering components
//!
//! Views are pure renders of [`AppState`]; the only value flowing back is the
//! lesson scroll limit, which the app uses to clamp the offset.

pub mod command_line;
pub mod landing;
pub mod layout;
pub mod lesson;
pub mod processing;
pub mod quiz;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::session::Phase;
use crate::app::state::{AppState, Overlay};
use crate::theme::Theme;

/// Main draw function; returns the lesson scroll limit while studying
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) -> Option<u16> {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [main, command] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let mut scroll_limit = None;
    let session = &state.session;
    match (session.phase(), session.study()) {
        (Phase::Studying, Some(study)) => {
            scroll_limit = Some(lesson::draw(frame, main, study, &session.walkthrough, theme));
        }
        (Phase::Testing, Some(study)) => quiz::draw(frame, main, study, &session.quiz, theme),
        (Phase::Processing, _) => processing::draw(frame, main, state, theme),
        _ => landing::draw(frame, main, state, theme),
    }

    command_line::draw(frame, command, &state.command_line, theme);

    match state.overlay {
        Overlay::None => {}
        Overlay::ConfirmExit => layout::draw_confirm_exit(frame, area, theme),
        Overlay::Help => layout::draw_help(frame, area, theme),
    }

    scroll_limit
}
