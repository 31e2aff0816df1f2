//! TrackFlow CLI - leads, orders and follow-up reminders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Capture a lead and win it (an order is created automatically)
//! trackflow lead add -n "Acme" --company "Acme Corp"
//! trackflow lead stage <LEAD_ID> won
//!
//! # Move the order along and schedule a follow-up
//! trackflow order stage <ORDER_ID> "in development"
//! trackflow reminder add -t "Confirm dispatch" -d 2026-10-20 --order <ORDER_ID>
//!
//! # Pipeline overview
//! trackflow dashboard
//! ```
//!
//! # Commands
//!
//! - `lead` - Manage leads (list, board, stage transitions)
//! - `order` - Manage orders
//! - `reminder` - Manage follow-up reminders
//! - `dashboard` - Summary counts and upcoming follow-ups
//! - `export` / `import` / `clear` - Data management

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trackflow_core::{DomainStore, FileStorage};

mod commands;
mod config;
mod error;
mod output;

use crate::commands::lead::LeadAction;
use crate::commands::order::OrderAction;
use crate::commands::reminder::ReminderAction;
use crate::config::{CliConfig, LogFormat};
use crate::error::CliError;
use crate::output::Output;

#[derive(Parser)]
#[command(name = "trackflow")]
#[command(author, version, about = "TrackFlow CRM: leads, orders and reminders")]
struct Cli {
    /// Directory holding the data files (overrides `TRACKFLOW_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage leads
    Lead {
        #[command(subcommand)]
        action: LeadAction,
    },
    /// Manage orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage follow-up reminders
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },
    /// Show the pipeline summary
    Dashboard,
    /// Export all data to a JSON file
    Export {
        /// Output file (default: trackflow-export-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore data from an exported JSON file, replacing current data
    Import {
        /// File produced by `export`
        path: PathBuf,
    },
    /// Permanently delete all data
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() {
    // Load .env before parsing so env-backed settings see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env();

    init_tracing(config.as_ref().map_or(LogFormat::Text, |c| c.log_format));

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr, keeping stdout for command output.
fn init_tracing(format: LogFormat) {
    // Defaults to warnings only if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trackflow_core=warn,trackflow=warn".into());

    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: CliConfig) -> Result<(), CliError> {
    let config = config.with_data_dir(cli.data_dir);
    tracing::debug!(data_dir = %config.data_dir.display(), "opening store");

    let mut store = DomainStore::open(FileStorage::new(&config.data_dir));
    let out = Output::new(cli.json);

    match cli.command {
        Commands::Lead { action } => commands::lead::run(&mut store, action, out),
        Commands::Order { action } => commands::order::run(&mut store, action, out),
        Commands::Reminder { action } => commands::reminder::run(&mut store, action, out),
        Commands::Dashboard => commands::data::dashboard(&store, out),
        Commands::Export { output } => commands::data::export(&store, output, out),
        Commands::Import { path } => commands::data::import(&mut store, &path, out),
        Commands::Clear { yes } => commands::data::clear(&mut store, yes, out),
    }
}
