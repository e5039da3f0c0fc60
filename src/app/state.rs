//! Application state definitions

use super::session::Session;

/// Modal layer drawn over the current phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    /// "Leave this session?" prompt
    ConfirmExit,
    /// Key reference
    Help,
}

/// State of the PDF intake on the landing screen
#[derive(Debug, Clone, Default)]
pub struct IntakeState {
    /// Extraction in flight; new submissions are refused
    pub busy: bool,
    /// Name of the file being (or last) processed
    pub file_name: Option<String>,
    /// Inline error from the last attempt
    pub error: Option<String>,
}

impl IntakeState {
    /// Mark a file as being extracted
    pub fn start(&mut self, file_name: impl Into<String>) {
        self.busy = true;
        self.file_name = Some(file_name.into());
        self.error = None;
    }

    /// Extraction finished successfully
    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Extraction or intake failed
    pub fn fail(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.error = Some(message.into());
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Normal mode - command line hidden or showing status
    #[default]
    Normal,
    /// Command mode - accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input (character index)
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 100;

    /// Start command mode with an empty buffer
    pub fn enter_command_mode(&mut self) {
        self.enter_command_mode_with("");
    }

    /// Start command mode with `prefill` already typed
    pub fn enter_command_mode_with(&mut self, prefill: &str) {
        self.mode = CommandMode::Command;
        self.input = prefill.to_string();
        self.cursor = self.char_count();
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    /// Get the number of characters in input
    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Check if we're in input mode
    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    /// Add to history, skipping immediate repeats
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history_index = match self.history_index {
            None => Some(self.history.len() - 1),
            Some(i) => Some(i.saturating_sub(1)),
        };
        if let Some(i) = self.history_index {
            self.input = self.history[i].clone();
            self.cursor = self.char_count();
        }
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.cursor = self.char_count();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Phase, curriculum and navigation
    pub session: Session,

    /// PDF intake status
    pub intake: IntakeState,

    /// Command line state
    pub command_line: CommandLineState,

    /// Active modal, if any
    pub overlay: Overlay,

    /// Frame counter for the busy spinner
    pub tick: u64,
}

impl AppState {
    /// Whether a background job (extraction or generation) is running
    pub fn is_busy(&self) -> bool {
        self.intake.busy || self.session.phase() == super::session::Phase::Processing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefilled_command_puts_cursor_at_end() {
        let mut line = CommandLineState::default();
        line.enter_command_mode_with("open ");
        assert!(line.is_input_mode());
        assert_eq!(line.cursor, 5);
        line.insert_char('x');
        assert_eq!(line.input, "open x");
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut line = CommandLineState::default();
        line.enter_command_mode();
        for c in "één".chars() {
            line.insert_char(c);
        }
        line.move_left();
        line.delete_char();
        assert_eq!(line.input, "én");
        line.move_start();
        line.delete_char_forward();
        assert_eq!(line.input, "n");
    }

    #[test]
    fn history_navigation() {
        let mut line = CommandLineState::default();
        line.add_to_history("open a.pdf".into());
        line.add_to_history("open a.pdf".into());
        line.add_to_history("help".into());
        assert_eq!(line.history.len(), 2);

        line.history_up();
        assert_eq!(line.input, "help");
        line.history_up();
        assert_eq!(line.input, "open a.pdf");
        line.history_up();
        assert_eq!(line.input, "open a.pdf");
        line.history_down();
        assert_eq!(line.input, "help");
        line.history_down();
        assert_eq!(line.input, "");
    }

    #[test]
    fn intake_lifecycle() {
        let mut intake = IntakeState::default();
        intake.fail("bad file");
        intake.start("notes.pdf");
        assert!(intake.busy);
        assert_eq!(intake.error, None);
        intake.fail("Please choose a PDF file.");
        assert!(!intake.busy);
        assert_eq!(intake.error.as_deref(), Some("Please choose a PDF file."));
    }

    #[test]
    fn busy_while_extracting() {
        let mut state = AppState::default();
        assert!(!state.is_busy());
        state.intake.start("doc.pdf");
        assert!(state.is_busy());
    }
}
