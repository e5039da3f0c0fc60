//! Command parsing for the command line

use std::path::PathBuf;

use crate::pdf::intake::resolve_path;

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a PDF: :open /path/to/file.pdf
    Open(PathBuf),
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Leave the current session: :home
    Home,
    /// Store a Gemini API key: :key <api-key>
    Key(String),
    /// Switch Gemini model: :model <flash|flash25|lite|pro>
    Model(String),
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    let needs_arg = |name: &str, build: fn(&str) -> Command| {
        if args.is_empty() {
            ParseResult::MissingArgument(name.to_string())
        } else {
            ParseResult::Ok(build(args))
        }
    };

    match cmd.to_lowercase().as_str() {
        "open" | "o" | "e" | "edit" => needs_arg("open", |a| Command::Open(resolve_path(a))),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "home" | "exit" => ParseResult::Ok(Command::Home),
        "key" => needs_arg("key", |a| Command::Key(a.to_string())),
        "model" | "m" => needs_arg("model", |a| Command::Model(a.to_string())),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
