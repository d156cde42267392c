use std::path::Path;

use clap::Parser;
use plantcare::{PlantName, SystemClock, Threshold, domain::status};
use tracing::instrument;

use super::terminal::Colorize;
use crate::cli::{open_store, prompt_to_proceed, status::resolve_threshold_days};

#[derive(Debug, Parser)]
#[command(about = "Remove plants and their watering history")]
pub struct Command {
    /// Names of the plants to remove
    #[arg(required_unless_present = "rows")]
    names: Vec<String>,

    /// Row numbers as shown by 'plant status', comma separated
    #[arg(long = "row", value_name = "ROWS", value_delimiter = ',', conflicts_with = "names")]
    rows: Vec<usize>,

    /// Threshold the row numbers were listed with (overrides config)
    #[arg(long, value_name = "DAYS", requires = "rows", value_parser = clap::value_parser!(u32).range(1..))]
    threshold_days: Option<u32>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root)?;

        let (indices, listed) = if self.rows.is_empty() {
            let mut listed = Vec::with_capacity(self.names.len());
            for name in &self.names {
                let plant = store
                    .get(name)
                    .ok_or_else(|| anyhow::anyhow!("No plant named '{name}'"))?;
                if !listed.contains(plant.name) {
                    listed.push(plant.name.clone());
                }
            }
            ((0..listed.len()).collect::<Vec<_>>(), listed)
        } else {
            let threshold = Threshold::days(resolve_threshold_days(self.threshold_days, root));
            let listed: Vec<PlantName> =
                status::report(store.all(), threshold, &SystemClock)
                    .rows()
                    .map(|plant| plant.name.clone())
                    .collect();
            (rows_to_indices(&self.rows)?, listed)
        };

        if !self.yes {
            println!("The following plants and their watering history will be removed:");
            for index in &indices {
                if let Some(name) = listed.get(*index) {
                    println!("  {}", name.as_str().warning());
                }
            }
            prompt_to_proceed()?;
        }

        store.remove_at(&indices, &listed)?;
        println!("{} {} plant(s)", "Removed".success(), count_distinct(&indices));
        Ok(())
    }
}

/// Converts 1-based row numbers to 0-based indices.
fn rows_to_indices(rows: &[usize]) -> anyhow::Result<Vec<usize>> {
    rows.iter()
        .map(|&row| {
            row.checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("Row numbers start at 1"))
        })
        .collect()
}

fn count_distinct(indices: &[usize]) -> usize {
    indices
        .iter()
        .collect::<std::collections::BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use plantcare::{PlantStore, domain::catalog};

    use super::*;

    fn store_with(names: &[&str]) -> (tempfile::TempDir, PlantStore) {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = PlantStore::open(tmp.path()).unwrap();
        for name in names {
            store.add(catalog::find(name).unwrap()).unwrap();
        }
        (tmp, store)
    }

    #[test]
    fn row_zero_is_rejected() {
        assert!(rows_to_indices(&[1, 0]).is_err());
        assert_eq!(rows_to_indices(&[1, 3]).unwrap(), vec![0, 2]);
    }

    #[test]
    fn removes_by_name() {
        let (tmp, _) = store_with(&["Calathea Kennedy", "Monstera deliciosa"]);

        Command {
            names: vec!["Calathea Kennedy".to_string()],
            rows: Vec::new(),
            threshold_days: None,
            yes: true,
        }
        .run(tmp.path())
        .unwrap();

        let store = PlantStore::open(tmp.path()).unwrap();
        assert!(store.get("Calathea Kennedy").is_none());
        assert!(store.get("Monstera deliciosa").is_some());
    }

    #[test]
    fn unknown_name_removes_nothing() {
        let (tmp, _) = store_with(&["Calathea Kennedy"]);

        let result = Command {
            names: vec!["Calathea Kennedy".to_string(), "Ghost".to_string()],
            rows: Vec::new(),
            threshold_days: None,
            yes: true,
        }
        .run(tmp.path());

        assert!(result.is_err());
        let store = PlantStore::open(tmp.path()).unwrap();
        assert!(store.get("Calathea Kennedy").is_some());
    }

    #[test]
    fn rows_follow_status_listing() {
        // Needs water: Alocasia, Calathea. Okay: Monstera.
        let (tmp, mut store) =
            store_with(&["Monstera deliciosa", "Calathea Kennedy", "Alocasia Frydek"]);
        store
            .record_watering("Monstera deliciosa", Utc::now() - TimeDelta::hours(1))
            .unwrap();

        Command {
            names: Vec::new(),
            rows: vec![2, 3],
            threshold_days: Some(7),
            yes: true,
        }
        .run(tmp.path())
        .unwrap();

        let store = PlantStore::open(tmp.path()).unwrap();
        let remaining: Vec<_> = store.all().iter().map(|p| p.name.to_string()).collect();
        assert_eq!(remaining, ["Alocasia Frydek"]);
    }

    #[test]
    fn row_past_the_end_removes_nothing() {
        let (tmp, _) = store_with(&["Calathea Kennedy"]);

        let result = Command {
            names: Vec::new(),
            rows: vec![1, 5],
            threshold_days: None,
            yes: true,
        }
        .run(tmp.path());

        assert!(result.is_err());
        assert_eq!(PlantStore::open(tmp.path()).unwrap().all().len(), 1);
    }
}
