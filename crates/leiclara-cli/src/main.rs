//! `leiclara`: simplify legal and contractual text from the terminal.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use leiclara_core::{samples, History, Mode};
use leiclara_runtime::{Orchestrator, RuntimeConfig, Settings};

mod render;

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser)]
#[command(name = "leiclara")]
#[command(version, about = "Simplifica textos jurídicos em português claro")]
#[command(
    after_help = "Environment:\n  GEMINI_API_KEY   API key (API_KEY also accepted)\n  GEMINI_MODEL     Preferred model\n  RUST_LOG         Log filter (default: warn)"
)]
struct Cli {
    /// YAML settings file (api_key, model, theme)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// `.env` file; `./.env` is read when present
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// YAML runtime config (api_base, default_model, fallback_models, timeout)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON history file, read before and written after `simplify`
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simplify a document (file, `-` for stdin, or a built-in sample)
    Simplify {
        /// Document path; stdin when omitted or `-`
        file: Option<PathBuf>,

        /// claro, adolescente or tecnico
        #[arg(long, short, default_value = "claro")]
        mode: Mode,

        /// Use a built-in sample (aluguel, termo-uso, trabalho)
        #[arg(long, conflicts_with = "file")]
        example: Option<String>,

        /// Skip the remote service even if a key is configured
        #[arg(long)]
        local: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List models usable for generateContent with the configured key
    Models,

    /// Show the saved history
    History {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List the built-in sample documents
    Samples,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("leiclara v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Simplify {
            file,
            mode,
            example,
            local,
            format,
        } => {
            let text = read_document(file.as_deref(), example.as_deref())?;
            simplify(&cli, &text, *mode, *local, *format).await
        }
        Command::Models => models(&cli).await,
        Command::History { format } => show_history(&cli, *format),
        Command::Samples => {
            for sample in samples::SAMPLES.iter() {
                println!("{:<10} {}", sample.name, sample.title);
            }
            Ok(())
        }
    }
}

async fn simplify(cli: &Cli, text: &str, mode: Mode, local: bool, format: Format) -> anyhow::Result<()> {
    let history = load_history(cli)?;
    let mut builder = Orchestrator::builder()
        .config(load_config(cli)?)
        .history(history);
    if !local {
        builder = builder
            .settings(&load_settings(cli)?)
            .context("Failed to configure the remote backend")?;
    }
    let orchestrator = builder.build();

    let outcome = orchestrator.process(text, mode).await?;

    if let Some(notice) = &outcome.notice {
        eprintln!("Aviso: {}", notice);
    }
    eprintln!("{}", render::origin_line(&outcome.origin));

    match format {
        Format::Text => println!("{}", render::result_report(&outcome.result)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&*outcome.result)?),
    }

    if let Some(path) = &cli.history_file {
        orchestrator
            .history()
            .save(path)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
    }

    Ok(())
}

async fn models(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli)?;
    let orchestrator = Orchestrator::builder()
        .config(load_config(cli)?)
        .settings(&settings)
        .context("Failed to configure the remote backend")?
        .build();

    let Some(remote) = orchestrator.remote() else {
        bail!("Configure a API Key para listar modelos.");
    };

    let models = remote.refresh_models().await?;
    if models.is_empty() {
        println!("Nenhum modelo disponível para generateContent nesta chave.");
        return Ok(());
    }

    let preferred = remote.preferred_model();
    for model in models {
        let marker = if model == preferred { "*" } else { " " };
        println!("{} {}", marker, model);
    }

    Ok(())
}

fn show_history(cli: &Cli, format: Format) -> anyhow::Result<()> {
    let history = load_history(cli)?;
    match format {
        Format::Text => println!("{}", render::history_listing(&history)),
        Format::Json => println!("{}", history.to_json()?),
    }
    Ok(())
}

fn read_document(file: Option<&Path>, example: Option<&str>) -> anyhow::Result<String> {
    if let Some(name) = example {
        let sample = samples::find(name).with_context(|| {
            let names: Vec<&str> = samples::SAMPLES.iter().map(|s| s.name).collect();
            format!("Unknown sample '{}' (available: {})", name, names.join(", "))
        })?;
        return Ok(sample.text.to_string());
    }

    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// YAML settings, then the `.env` file, then the process environment.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(path) = &cli.settings {
        let file = Settings::from_yaml_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        settings = settings.merge(file);
    }

    let env_file = match &cli.env_file {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_ENV_FILE)).filter(|p| p.exists()),
    };
    if let Some(path) = env_file {
        let file = Settings::from_env_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        settings = settings.merge(file);
    }

    Ok(settings.merge(Settings::from_process_env()))
}

fn load_config(cli: &Cli) -> anyhow::Result<RuntimeConfig> {
    match &cli.config {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            RuntimeConfig::from_yaml(&yaml)
                .with_context(|| format!("Invalid config {}", path.display()))
        }
        None => Ok(RuntimeConfig::default()),
    }
}

fn load_history(cli: &Cli) -> anyhow::Result<History> {
    match &cli.history_file {
        Some(path) => History::load(path)
            .with_context(|| format!("Failed to load history from {}", path.display())),
        None => Ok(History::new()),
    }
}
