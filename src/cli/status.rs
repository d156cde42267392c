use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Parser;
use plantcare::{
    Clock, Config, PlantView, SystemClock, Threshold,
    domain::status::{self, WateringReport},
};
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;
use crate::cli::{format_age, format_timestamp, open_store};

#[derive(Debug, Parser, Default)]
#[command(about = "Show which plants need water and which are okay for now")]
pub struct Command {
    /// Days without water before a plant needs water (overrides config)
    #[arg(long, value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
    threshold_days: Option<u32>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;
        let threshold_days = resolve_threshold_days(self.threshold_days, root);
        let now = SystemClock.now();

        let report = status::partition(store.all(), Threshold::days(threshold_days), now);

        match self.output {
            OutputFormat::Json => output_json(&report, threshold_days, now)?,
            OutputFormat::Table => output_table(&report, now),
        }

        Ok(())
    }
}

/// The threshold given on the command line, or the configured one.
pub(super) fn resolve_threshold_days(overridden: Option<u32>, root: &Path) -> u32 {
    overridden.unwrap_or_else(|| Config::load_or_default(root).threshold_days())
}

fn output_table(report: &WateringReport<'_>, now: DateTime<Utc>) {
    if report.is_empty() {
        println!("No plants yet. Adopt one with 'plant add'.");
        return;
    }

    let width = report
        .rows()
        .map(|plant| plant.name.chars().count())
        .max()
        .unwrap_or_default();

    let mut row = 0;

    if !report.needs_water.is_empty() {
        println!("{}", "Needs water".warning());
        for plant in &report.needs_water {
            row += 1;
            print_row(row, plant, width, now);
        }
    }

    if !report.okay.is_empty() {
        if !report.needs_water.is_empty() {
            println!();
        }
        println!("{}", "Okay for now".success());
        for plant in &report.okay {
            row += 1;
            print_row(row, plant, width, now);
        }
    }
}

fn print_row(row: usize, plant: &PlantView<'_>, width: usize, now: DateTime<Utc>) {
    let last = plant.most_recent_watering().map_or_else(
        || "never watered".to_string(),
        |at| format!("last watered {} ({})", format_timestamp(at), format_age(at, now)),
    );
    println!("{row:>3}. {:<width$}  {}", plant.name.as_str(), last.dim());
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    row: usize,
    name: &'a str,
    last_watered: Option<DateTime<Utc>>,
}

fn output_json(
    report: &WateringReport<'_>,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    use serde_json::json;

    let rows: Vec<JsonRow<'_>> = report
        .rows()
        .enumerate()
        .map(|(i, plant)| JsonRow {
            row: i + 1,
            name: plant.name.as_str(),
            last_watered: plant.most_recent_watering(),
        })
        .collect();
    let (needs_water, okay) = rows.split_at(report.needs_water.len());

    let output = json!({
        "now": now,
        "threshold_days": threshold_days,
        "needs_water": needs_water,
        "okay": okay,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
