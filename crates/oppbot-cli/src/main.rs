//! Oppbot CLI: entry point.
//!
//! # Commands
//!
//! - `oppbot serve [--config PATH] [--logs] [--json]`: run the events webhook
//! - `oppbot status [--config PATH]`: show configuration status
//! - `oppbot classify <FILE>`: classify a saved event payload

mod classify;
mod serve;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Oppbot: onboards opportunity channels and answers mentions in Slack
#[derive(Parser)]
#[command(name = "oppbot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Slack events webhook server
    Serve {
        /// Config file (defaults to ~/.oppbot/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,

        /// Emit logs as JSON lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show configuration status
    Status {
        /// Config file (defaults to ~/.oppbot/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Classify a saved event payload and print what would happen
    Classify {
        /// Path to a JSON payload as delivered by Slack
        file: PathBuf,

        /// Config file (defaults to ~/.oppbot/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, logs, json } => {
            init_logging(logs, json);
            serve::run(config.as_deref()).await
        }
        Commands::Status { config } => status::run(config.as_deref()),
        Commands::Classify { file, config } => classify::run(&file, config.as_deref()),
    }
}

/// Initialize tracing. `RUST_LOG` takes precedence over `--logs`.
fn init_logging(verbose: bool, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("oppbot=debug,tower_http=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
