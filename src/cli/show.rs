use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Parser;
use plantcare::{Clock, PlantView, SystemClock, Threshold, domain::status};
use serde_json::{Value, json};
use tracing::instrument;

use super::terminal::Colorize;
use crate::cli::{format_age, format_timestamp, open_store, status::resolve_threshold_days};

#[derive(Debug, Parser)]
#[command(about = "Display detailed information about a plant")]
pub struct Command {
    /// Name of the plant to display
    name: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;

        let Some(plant) = store.get(&self.name) else {
            anyhow::bail!("No plant named '{}'", self.name);
        };

        let threshold = Threshold::days(resolve_threshold_days(None, root));
        let now = SystemClock.now();

        match self.output {
            OutputFormat::Pretty => output_pretty(&plant, threshold, now),
            OutputFormat::Json => output_json(&plant, threshold, now)?,
        }

        Ok(())
    }
}

fn output_pretty(plant: &PlantView<'_>, threshold: Threshold, now: DateTime<Utc>) {
    println!("# {}", plant.name);
    println!("{}\n", plant.details);

    println!("{}", "Status".dim());
    if status::is_overdue(plant, threshold, now) {
        println!("  {}", "Needs water".warning());
    } else {
        println!("  {}", "Okay for now".success());
    }
    println!("  Icon:     {}", plant.icon_reference);

    let history = plant.waterings_newest_first();
    if history.is_empty() {
        println!("\n{}", "Never watered".dim());
        return;
    }

    println!("\n{} ({})", "Waterings".dim(), history.len());
    for event in history {
        let at = event.timestamp();
        println!("  {}  {}", format_timestamp(at), format_age(at, now).dim());
    }
}

fn output_json(
    plant: &PlantView<'_>,
    threshold: Threshold,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let output = to_json(plant, threshold, now);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn to_json(plant: &PlantView<'_>, threshold: Threshold, now: DateTime<Utc>) -> Value {
    let waterings: Vec<DateTime<Utc>> = plant
        .waterings_newest_first()
        .into_iter()
        .map(|event| event.timestamp())
        .collect();

    json!({
        "name": plant.name.as_str(),
        "details": plant.details,
        "icon": plant.icon_reference,
        "needs_water": status::is_overdue(plant, threshold, now),
        "last_watered": plant.most_recent_watering(),
        "waterings": waterings,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use plantcare::{PlantStore, domain::catalog};

    use super::*;

    #[test]
    fn unknown_plant_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = Command {
            name: "Ghost".to_string(),
            output: OutputFormat::Pretty,
        }
        .run(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn json_lists_history_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = PlantStore::open(tmp.path()).unwrap();
        store.add(catalog::find("Monstera deliciosa").unwrap()).unwrap();

        let day = |d| Utc.with_ymd_and_hms(2025, 2, d, 9, 30, 0).unwrap();
        for d in [3, 10, 1] {
            store.record_watering("Monstera deliciosa", day(d)).unwrap();
        }
        let plant = store.get("Monstera deliciosa").unwrap();

        let fresh = to_json(&plant, Threshold::default(), day(12));
        assert_eq!(fresh["name"], "Monstera deliciosa");
        assert_eq!(fresh["icon"], "MonsteraDeliciosa");
        assert_eq!(fresh["needs_water"], false);
        assert_eq!(fresh["last_watered"], json!(day(10)));
        assert_eq!(fresh["waterings"], json!([day(10), day(3), day(1)]));

        let stale = to_json(&plant, Threshold::default(), day(17));
        assert_eq!(stale["needs_water"], true);
    }

    #[test]
    fn json_for_unwatered_plant() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = PlantStore::open(tmp.path()).unwrap();
        store.add(catalog::find("Euphorbe").unwrap()).unwrap();
        let plant = store.get("Euphorbe").unwrap();

        let output = to_json(&plant, Threshold::default(), Utc::now());
        assert_eq!(output["needs_water"], true);
        assert!(output["last_watered"].is_null());
        assert_eq!(output["waterings"], json!([]));
    }
}
