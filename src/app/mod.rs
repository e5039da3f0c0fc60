//! Application state and event handling

pub mod command;
pub mod dispatch;
pub mod input;
pub mod quiz;
pub mod session;
pub mod state;
pub mod walkthrough;

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::gemini::{ApiKeyManager, GeminiError, GeminiModel};
use crate::pdf::{LopdfExtractor, PdfError, TextExtractor, extract_text, read_pdf};
use crate::study::{GenerationError, StudyData, StudyGenerator};
use crate::ui;
use dispatch::Effect;
use state::AppState;

/// Result sent back by a background job
#[derive(Debug)]
pub enum WorkerEvent {
    Extracted(Result<String, PdfError>),
    Generated(Result<StudyData, GenerationError>),
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// PDF text engine shared with extraction jobs
    extractor: Arc<dyn TextExtractor>,

    events_tx: mpsc::UnboundedSender<WorkerEvent>,
    events_rx: mpsc::UnboundedReceiver<WorkerEvent>,

    /// Cancels the in-flight generation, if any
    cancel_token: Option<CancellationToken>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            state: AppState::default(),
            terminal,
            extractor: Arc::new(LopdfExtractor),
            events_tx,
            events_rx,
            cancel_token: None,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Queue a PDF for study, as if typed with `:open`
    pub fn open(&mut self, path: PathBuf) {
        let effect = dispatch::request_open(&mut self.state, path);
        self.apply(effect);
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();

        loop {
            let mut lesson_scroll_limit = None;
            self.terminal.draw(|frame| {
                lesson_scroll_limit = ui::draw(frame, &self.state, &theme);
            })?;
            if let Some(max) = lesson_scroll_limit {
                self.state.session.walkthrough.clamp_scroll(max);
            }

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let effect = dispatch::handle_key(&mut self.state, key);
                        if self.apply(effect) {
                            break;
                        }
                    }
                }
            }

            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_worker_event(event);
            }

            self.state.tick = self.state.tick.wrapping_add(1);
        }

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.restore_terminal()?;
        Ok(())
    }

    /// Carry out an effect; returns true if the app should exit
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Open(path) => self.start_extraction(path),
            Effect::CancelGeneration => {
                if let Some(token) = &self.cancel_token {
                    tracing::info!("Cancelling generation");
                    token.cancel();
                    self.state.command_line.set_message("Cancelling...");
                }
            }
            Effect::StoreKey(key) => match ApiKeyManager::set_api_key(&key) {
                Ok(()) => {
                    let masked = ApiKeyManager::mask_key(&key);
                    self.state.command_line.set_message(format!("API key saved ({})", masked));
                }
                Err(e) => {
                    tracing::error!("Failed to store API key: {}", e);
                    self.state.command_line.set_error(e.to_string());
                }
            },
            Effect::SwitchModel(model) => self.switch_model(model),
        }
        false
    }

    fn switch_model(&mut self, model: GeminiModel) {
        self.config.model = model;
        match self.config.save() {
            Ok(()) => {
                tracing::info!("Model set to {}", model.model_id());
                self.state.command_line.set_message(format!("Model: {}", model.display_name()));
            }
            Err(e) => {
                tracing::error!("Failed to save config: {:#}", e);
                self.state
                    .command_line
                    .set_error(format!("Model: {} (not saved: {})", model.display_name(), e));
            }
        }
    }

    /// Read and extract a file off the UI thread
    fn start_extraction(&mut self, path: PathBuf) {
        self.state.intake.start(file_label(&path));
        self.state.command_line.clear_message();

        let extractor = Arc::clone(&self.extractor);
        let min_chars = self.config.min_text_chars;
        let tx = self.events_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result =
                read_pdf(&path).and_then(|bytes| extract_text(extractor.as_ref(), &bytes, min_chars));
            let _ = tx.send(WorkerEvent::Extracted(result));
        });
    }

    /// Ask the model for a curriculum in the background
    fn start_generation(&mut self, text: String) {
        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());

        let generator = StudyGenerator::new(self.config.clone(), lookup_api_key());
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = generator.generate(&text, token).await;
            let _ = tx.send(WorkerEvent::Generated(result));
        });
    }

    fn handle_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Extracted(result) => {
                if let Some(text) = dispatch::on_extracted(&mut self.state, result) {
                    self.start_generation(text);
                }
            }
            WorkerEvent::Generated(result) => {
                self.cancel_token = None;
                self.state.command_line.clear_message();
                dispatch::on_generated(&mut self.state, result);
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// API key from the environment or keyring; `None` when there is none
fn lookup_api_key() -> Option<String> {
    match ApiKeyManager::get_api_key() {
        Ok(key) => Some(key),
        Err(GeminiError::ApiKeyNotFound) => None,
        Err(e) => {
            tracing::warn!("Could not read API key: {}", e);
            None
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
