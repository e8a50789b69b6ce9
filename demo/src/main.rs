//! Formulary dashboard engine demo CLI
//!
//! Runs one or all of the dashboard demo scenarios against a
//! `DashboardSession`. By default the session reads the built-in fixture
//! resources; `--data-dir` points it at a directory of published JSON
//! resources instead. The scenarios look up fixture ids and leaf codes, so a
//! foreign data set may report them as not found.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- confidence
//!   cargo run -p demo -- categories --data-dir ./data
//!   cargo run -p demo -- narrative --config dashboard.toml

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use formulary_contracts::error::FormularyResult;
use formulary_core::traits::ResourceStore;
use formulary_dashboard::{
    fixtures,
    scenarios::{categories, confidence, filtering, loading, narrative},
    DashboardConfig, DashboardSession,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Formulary dashboard engine demo.
///
/// Each subcommand runs one or all of the dashboard scenarios, showing
/// confidence annotation, faceted filtering, category drill-downs, narrative
/// normalization and lazy resource loading.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Formulary dashboard engine demo",
    long_about = "Runs formulary dashboard scenarios over fixture data or a directory\n\
                  of published medication, detail and category-report resources."
)]
struct Cli {
    /// Read resources from this directory instead of the built-in fixtures.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Dashboard configuration file (TOML). Defaults to the embedded config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run all five scenarios in sequence.
    RunAll,
    /// Scenario 1: classification confidence badges and mapping panels.
    Confidence,
    /// Scenario 2: multi-facet filtering and filter options.
    Filtering,
    /// Scenario 3: category counts and drill-downs with fallbacks.
    Categories,
    /// Scenario 4: narrative repair and checklist consolidation.
    Narrative,
    /// Scenario 5: lazy resource loading and slot status.
    Loading,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=info to see resource loads.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    match run(&cli).await {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> FormularyResult<()> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::embedded()?,
    };

    match &cli.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "reading resources from directory");
            let store = config.directory_store(dir);
            dispatch(&DashboardSession::new(store, config), cli.command).await
        }
        None => {
            let session = DashboardSession::new(fixtures::fixture_store(), config);
            dispatch(&session, cli.command).await
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn dispatch<S: ResourceStore>(session: &DashboardSession<S>, command: Command) -> FormularyResult<()> {
    match command {
        Command::RunAll => {
            // Loading runs first so it observes the slots before any request.
            loading::run_scenario(session).await?;
            confidence::run_scenario(session).await?;
            filtering::run_scenario(session).await?;
            categories::run_scenario(session).await?;
            narrative::run_scenario(session).await
        }
        Command::Confidence => confidence::run_scenario(session).await,
        Command::Filtering => filtering::run_scenario(session).await,
        Command::Categories => categories::run_scenario(session).await,
        Command::Narrative => narrative::run_scenario(session).await,
        Command::Loading => loading::run_scenario(session).await,
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Formulary Dashboard Engine");
    println!("Demo Runner");
    println!("==========================");
    println!();
    println!("Per session:");
    println!("  [1] Medication snapshot loaded once, on first use");
    println!("  [2] Detail and category-report maps loaded lazily, fetched at most once");
    println!("  [3] Filters, confidence and aggregation computed from the snapshot");
    println!("  [4] Narratives repaired, rendered, and their checklists consolidated");
    println!();
}
