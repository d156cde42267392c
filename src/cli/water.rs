use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use plantcare::{Clock, StoreError, SystemClock};
use tracing::instrument;

use super::terminal::Colorize;
use crate::cli::{format_timestamp, open_store};

#[derive(Debug, Parser)]
#[command(about = "Record that a plant was watered")]
pub struct Command {
    /// Name of the plant that was watered
    name: String,

    /// When the plant was watered, as an RFC 3339 timestamp (defaults to now)
    #[arg(long, value_name = "TIMESTAMP")]
    at: Option<DateTime<Utc>>,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let at = self.at.unwrap_or_else(|| SystemClock.now());
        let mut store = open_store(root)?;

        match store.record_watering(&self.name, at) {
            Ok(event) => {
                println!(
                    "{} {} on {}",
                    "Watered".success(),
                    self.name,
                    format_timestamp(event.timestamp())
                );
                Ok(())
            }
            Err(StoreError::NotFound(name)) => {
                anyhow::bail!("No plant named '{name}'\n\nRun 'plant status' to list your plants")
            }
            Err(e) => Err(e).context("Failed to record watering"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use plantcare::{PlantStore, domain::catalog};

    use super::*;

    #[test]
    fn records_watering_at_given_time() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = PlantStore::open(tmp.path()).unwrap();
        store.add(catalog::find("Alocasia Frydek").unwrap()).unwrap();

        let at = Utc.with_ymd_and_hms(2025, 2, 3, 9, 30, 0).unwrap();
        Command {
            name: "Alocasia Frydek".to_string(),
            at: Some(at),
        }
        .run(tmp.path())
        .unwrap();

        let store = PlantStore::open(tmp.path()).unwrap();
        let plant = store.get("Alocasia Frydek").unwrap();
        assert_eq!(plant.most_recent_watering(), Some(at));
    }

    #[test]
    fn unknown_plant_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let error = Command {
            name: "Ghost".to_string(),
            at: None,
        }
        .run(tmp.path())
        .unwrap_err();

        assert!(error.to_string().contains("No plant named 'Ghost'"));
    }
}
