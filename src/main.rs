//! Hyper-Encabulator
//!
//! Type a question, press the button, watch a great deal happen, learn nothing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use encabulator::{
    headless,
    window::EncabulatorWindow,
    AnalysisSettings,
    Config,
};

#[derive(Parser)]
#[command(name = "encabulator")]
#[command(author = "Encabulator Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Performs an advanced, entirely pointless analysis of your input")]
struct Cli {
    /// Log level filter (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the encabulator window
    Window,

    /// Run one analysis in the terminal
    Run {
        /// Data to encabulate
        #[arg(default_value = "")]
        query: String,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Skip all the dramatic pauses
        #[arg(long)]
        fast: bool,
    },

    /// Show the config file location and contents
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Some(Commands::Window) | None => run_window()?,
        Some(Commands::Run { query, seed, fast }) => run_headless(&query, seed, fast).await?,
        Some(Commands::Config) => show_config()?,
    }

    Ok(())
}

/// Open the GUI
fn run_window() -> Result<()> {
    info!("Starting encabulator window...");

    let config = Config::load()?;

    EncabulatorWindow::run(config)
        .map_err(|e| anyhow::anyhow!("Window error: {}", e))?;

    Ok(())
}

/// Run one analysis without a window
async fn run_headless(query: &str, seed: Option<u64>, fast: bool) -> Result<()> {
    let config = Config::load()?;

    let mut settings = if fast {
        AnalysisSettings {
            seed: config.analysis.seed,
            chatter_chance: config.analysis.chatter_chance,
            visualize_every: config.analysis.visualize_every,
            ..AnalysisSettings::instant()
        }
    } else {
        config.analysis
    };
    if seed.is_some() {
        settings.seed = seed;
    }

    let mut stdout = std::io::stdout().lock();
    headless::run(query, settings, &mut stdout).await?;

    Ok(())
}

/// Print where the config lives and what it says
fn show_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load_from(&path)?;

    println!("Config file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
