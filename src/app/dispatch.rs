//! Key and worker-event handling
//!
//! Everything here mutates [`AppState`] only. Work that needs the runtime,
//! the keyring or the config file is returned as an [`Effect`] for the
//! [`App`](super::App) to carry out.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use super::command::{Command, ParseResult, parse_command};
use super::input::{Action, key_with_modifier_to_action};
use super::session::Phase;
use super::state::{AppState, Overlay};
use super::walkthrough::WalkStep;
use crate::gemini::GeminiModel;
use crate::pdf::PdfError;
use crate::study::{GenerationError, StudyData};

/// Lines moved by a page scroll
const PAGE_LINES: u16 = 10;

/// Side effect requested by a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Read and extract this file
    Open(PathBuf),
    /// Abort the in-flight generation
    CancelGeneration,
    /// Save an API key to the keyring
    StoreKey(String),
    /// Use a different model from now on
    SwitchModel(GeminiModel),
}

/// Handle one key press
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Effect {
    if state.command_line.is_input_mode() {
        return handle_command_input(state, key.code);
    }

    let Some(action) = key_with_modifier_to_action(key.code, key.modifiers) else {
        return Effect::None;
    };

    match state.overlay {
        Overlay::Help => {
            state.overlay = Overlay::None;
            return Effect::None;
        }
        Overlay::ConfirmExit => {
            match action {
                Action::Confirm | Action::Select => {
                    state.overlay = Overlay::None;
                    if state.session.exit().is_ok() {
                        state.command_line.set_message("Session closed");
                    }
                }
                Action::Deny | Action::Back => state.overlay = Overlay::None,
                _ => {}
            }
            return Effect::None;
        }
        Overlay::None => {}
    }

    if state.session.error().is_some() && matches!(action, Action::Select | Action::Back) {
        state.session.dismiss_error();
        return Effect::None;
    }

    match action {
        Action::Command => {
            state.command_line.enter_command_mode();
            return Effect::None;
        }
        Action::Help => {
            state.overlay = Overlay::Help;
            return Effect::None;
        }
        _ => {}
    }

    match state.session.phase() {
        Phase::Landing => handle_landing(state, action),
        Phase::Processing => handle_processing(action),
        Phase::Studying => handle_studying(state, action),
        Phase::Testing => handle_testing(state, action),
    }
}

fn handle_landing(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::Open | Action::Select => {
            if state.intake.busy {
                state.command_line.set_error("Still reading the current file...");
            } else {
                state.command_line.enter_command_mode_with("open ");
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
        _ => Effect::None,
    }
}

fn handle_processing(action: Action) -> Effect {
    match action {
        Action::Back => Effect::CancelGeneration,
        Action::Quit => Effect::Quit,
        _ => Effect::None,
    }
}

fn handle_studying(state: &mut AppState, action: Action) -> Effect {
    let walkthrough = &mut state.session.walkthrough;
    match action {
        Action::Next | Action::Select => {
            if walkthrough.next() == WalkStep::Finished {
                let _ = state.session.walkthrough_finished();
            }
        }
        Action::Previous => {
            walkthrough.previous();
        }
        Action::Down => walkthrough.scroll_down(1),
        Action::Up => walkthrough.scroll_up(1),
        Action::PageDown => walkthrough.scroll_down(PAGE_LINES),
        Action::PageUp => walkthrough.scroll_up(PAGE_LINES),
        Action::Exit | Action::Back | Action::Quit | Action::Home => {
            state.overlay = Overlay::ConfirmExit;
        }
        _ => {}
    }
    Effect::None
}

fn handle_testing(state: &mut AppState, action: Action) -> Effect {
    if state.session.quiz.show_results {
        match action {
            Action::Restart => {
                let _ = state.session.restart();
            }
            Action::Home | Action::Previous => {
                let _ = state.session.exit();
            }
            Action::Exit => state.overlay = Overlay::ConfirmExit,
            Action::Quit => return Effect::Quit,
            _ => {}
        }
        return Effect::None;
    }

    let Some((question, quiz, total)) = state.session.current_question() else {
        return Effect::None;
    };

    match action {
        Action::Down => quiz.select_next(question),
        Action::Up => quiz.select_previous(question),
        Action::Choose(i) => quiz.select(i, question),
        Action::Select => {
            if quiz.answered {
                quiz.advance(total);
            } else if quiz.confirm(question).is_none() {
                state.command_line.set_message("Pick an answer first");
            }
        }
        Action::Next => quiz.advance(total),
        Action::Exit | Action::Back | Action::Quit | Action::Home => {
            state.overlay = Overlay::ConfirmExit;
        }
        _ => {}
    }
    Effect::None
}

/// Keys typed while the command line has focus
fn handle_command_input(state: &mut AppState, code: KeyCode) -> Effect {
    let line = &mut state.command_line;
    match code {
        KeyCode::Esc => line.exit_input_mode(),
        KeyCode::Enter => {
            let input = line.input.clone();
            line.add_to_history(input.clone());
            line.exit_input_mode();
            return run_command(state, &input);
        }
        KeyCode::Backspace => line.delete_char(),
        KeyCode::Delete => line.delete_char_forward(),
        KeyCode::Left => line.move_left(),
        KeyCode::Right => line.move_right(),
        KeyCode::Home => line.move_start(),
        KeyCode::End => line.move_end(),
        KeyCode::Up => line.history_up(),
        KeyCode::Down => line.history_down(),
        KeyCode::Char(c) => line.insert_char(c),
        _ => {}
    }
    Effect::None
}

/// Execute a command line entry
pub fn run_command(state: &mut AppState, input: &str) -> Effect {
    let command = match parse_command(input) {
        ParseResult::Ok(command) => command,
        ParseResult::UnknownCommand(cmd) => {
            state.command_line.set_error(format!("Unknown command: {}", cmd));
            return Effect::None;
        }
        ParseResult::MissingArgument(cmd) => {
            state.command_line.set_error(format!(":{} needs an argument", cmd));
            return Effect::None;
        }
    };

    match command {
        Command::Open(path) => request_open(state, path),
        Command::Quit => Effect::Quit,
        Command::Help => {
            state.overlay = Overlay::Help;
            Effect::None
        }
        Command::Home => {
            if matches!(state.session.phase(), Phase::Studying | Phase::Testing) {
                state.overlay = Overlay::ConfirmExit;
            } else {
                state.command_line.set_message("Already home");
            }
            Effect::None
        }
        Command::Key(key) => Effect::StoreKey(key),
        Command::Model(name) => match name.parse::<GeminiModel>() {
            Ok(model) => Effect::SwitchModel(model),
            Err(e) => {
                state.command_line.set_error(e);
                Effect::None
            }
        },
        Command::Nop => {
            state.command_line.clear_message();
            Effect::None
        }
    }
}

/// Ask to open a file; refused while busy or outside the landing phase
pub fn request_open(state: &mut AppState, path: PathBuf) -> Effect {
    if state.is_busy() {
        state.command_line.set_error("Please wait for the current file to finish");
        return Effect::None;
    }
    if state.session.phase() != Phase::Landing {
        state.command_line.set_error("Leave the current session (:home) before opening a file");
        return Effect::None;
    }
    Effect::Open(path)
}

/// Extraction finished; returns the text to generate from on success
pub fn on_extracted(state: &mut AppState, result: Result<String, PdfError>) -> Option<String> {
    match result {
        Ok(text) => {
            state.intake.finish();
            match state.session.content_extracted() {
                Ok(()) => Some(text),
                Err(e) => {
                    state.command_line.set_error(e.to_string());
                    None
                }
            }
        }
        Err(e) => {
            if e.is_input_error() {
                tracing::info!("Rejected document: {}", e);
            } else {
                tracing::error!("Extraction failed: {}", e);
            }
            state.intake.fail(e.to_string());
            None
        }
    }
}

/// Generation finished
pub fn on_generated(state: &mut AppState, result: Result<StudyData, GenerationError>) {
    let outcome = match result {
        Ok(data) => state.session.generation_succeeded(data),
        Err(e) => {
            tracing::warn!("Generation failed: {}", e);
            state.session.generation_failed(e.to_string())
        }
    };
    if let Err(e) = outcome {
        tracing::error!("Dropped generation result: {}", e);
    }
}
