use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

mod add;
mod catalog;
mod config;
mod remove;
mod show;
mod status;
mod terminal;
mod water;

use chrono::{DateTime, Utc};
use clap::ArgAction;
use plantcare::PlantStore;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory the plant collection is stored in
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.unwrap_or_default().run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show which plants need water (default)
    Status(status::Command),

    /// List the plants that can be adopted
    Catalog(catalog::Command),

    /// Adopt a plant from the catalog
    Add(add::Command),

    /// Record a watering
    Water(water::Command),

    /// Remove plants and their watering history
    Remove(remove::Command),

    /// Show detailed information about a plant
    Show(show::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Default for Command {
    fn default() -> Self {
        Self::Status(status::Command::default())
    }
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Catalog(command) => command.run()?,
            Self::Add(command) => command.run(root)?,
            Self::Water(command) => command.run(root)?,
            Self::Remove(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Config(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Opens the plant store, attaching the path to any error.
fn open_store(root: &Path) -> anyhow::Result<PlantStore> {
    PlantStore::open(root).map_err(|e| anyhow::anyhow!("Failed to open plant collection: {e}"))
}

/// Formats a timestamp for display, e.g. `3 Feb 2025 - 09:30`.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-d %b %Y - %H:%M").to_string()
}

/// Describes how long ago a timestamp was, in whole days.
fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - timestamp).num_days() {
        i64::MIN..=-1 => "in the future".to_string(),
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        days => format!("{days} days ago"),
    }
}

fn prompt_to_proceed() -> std::io::Result<()> {
    eprint!("\nProceed? (y/N) ");
    let stdin = std::io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled");
        std::process::exit(130);
    }
    Ok(())
}
