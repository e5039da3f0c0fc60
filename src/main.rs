use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use smart_tutor::gemini::{ApiKeyManager, GeminiError, GeminiModel, KeySource};
use smart_tutor::pdf::{LopdfExtractor, extract_text, intake::resolve_path, read_pdf};
use smart_tutor::study::StudyGenerator;
use smart_tutor::{App, Config};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "smart-tutor")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// PDF to open right away
    path: Option<String>,

    /// Gemini model for this run (flash, flash25, lite, pro)
    #[arg(long, global = true)]
    model: Option<GeminiModel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text extracted from a PDF
    Extract {
        /// Path to the PDF
        path: String,
    },
    /// Generate lessons and a quiz from a PDF and print them as JSON
    Generate {
        /// Path to the PDF
        path: String,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key in the system keyring
    Set { key: String },
    /// Remove the stored key
    Clear,
    /// Show which key would be used
    Status,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "smart_tutor=info".into())
}

/// Log to a file while the TUI owns the terminal
fn init_file_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    match cli.command {
        Some(Commands::Extract { path }) => {
            init_stderr_logging();
            let text = extract(&config, &path)?;
            print!("{}", text);
        }
        Some(Commands::Generate { path, output }) => {
            init_stderr_logging();
            generate(config, &path, output).await?;
        }
        Some(Commands::Key { action }) => {
            init_stderr_logging();
            manage_key(action)?;
        }
        None => {
            init_file_logging()?;
            let mut app = App::new(config)?;
            if let Some(path) = cli.path {
                app.open(resolve_path(&path));
            }
            app.run().await?;
        }
    }

    Ok(())
}

fn extract(config: &Config, path: &str) -> Result<String> {
    let path = resolve_path(path);
    let bytes = read_pdf(&path)?;
    let text = extract_text(&LopdfExtractor, &bytes, config.min_text_chars)
        .with_context(|| format!("Failed to extract text from {:?}", path))?;
    Ok(text)
}

async fn generate(config: Config, path: &str, output: Option<PathBuf>) -> Result<()> {
    let text = extract(&config, path)?;

    let api_key = match ApiKeyManager::get_api_key() {
        Ok(key) => Some(key),
        Err(GeminiError::ApiKeyNotFound) => None,
        Err(e) => return Err(e.into()),
    };
    let generator = StudyGenerator::new(config, api_key);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let data = generator.generate(&text, cancel).await?;
    let json = data.to_json_pretty()?;

    match output {
        Some(out) => {
            fs::write(&out, json).with_context(|| format!("Failed to write {:?}", out))?;
            eprintln!(
                "Wrote {} lessons and {} questions to {}",
                data.lesson_count(),
                data.question_count(),
                out.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn manage_key(action: KeyAction) -> Result<()> {
    match action {
        KeyAction::Set { key } => {
            ApiKeyManager::set_api_key(&key)?;
            println!("Stored API key {}", ApiKeyManager::mask_key(key.trim()));
        }
        KeyAction::Clear => {
            ApiKeyManager::delete_api_key()?;
            println!("Removed stored API key");
        }
        KeyAction::Status => match ApiKeyManager::resolve() {
            Ok((key, source)) => {
                let from = match source {
                    KeySource::Environment(var) => format!("${}", var),
                    KeySource::Keyring => "system keyring".to_string(),
                };
                println!("Using {} from {}", ApiKeyManager::mask_key(&key), from);
            }
            Err(GeminiError::ApiKeyNotFound) => {
                bail!("No API key found. Set GEMINI_API_KEY or run `smart-tutor key set <KEY>`")
            }
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
