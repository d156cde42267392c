use std::path::Path;

use anyhow::Context;
use clap::Parser;
use plantcare::{PlantTemplate, StoreError, domain::catalog};
use tracing::instrument;

use super::terminal::Colorize;
use crate::cli::open_store;

#[derive(Debug, Parser)]
#[command(about = "Adopt a plant from the catalog")]
pub struct Command {
    /// Catalog name of the plant to adopt (prompts when omitted)
    name: Option<String>,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let template = match self.name {
            Some(name) => lookup(&name)?,
            None => select()?,
        };

        let mut store = open_store(root)?;
        match store.add(template) {
            Ok(plant) => {
                println!("{} {}", "Adopted".success(), plant.name);
                Ok(())
            }
            Err(StoreError::DuplicateName(name)) => {
                anyhow::bail!("'{name}' is already in your collection")
            }
            Err(e) => Err(e).context("Failed to add plant"),
        }
    }
}

fn lookup(name: &str) -> anyhow::Result<&'static PlantTemplate> {
    catalog::find(name).with_context(|| {
        format!("'{name}' is not in the catalog\n\nRun 'plant catalog' to see the available plants")
    })
}

fn select() -> anyhow::Result<&'static PlantTemplate> {
    let templates = catalog::list();
    let names: Vec<&str> = templates.iter().map(|template| template.name).collect();

    let index = dialoguer::Select::new()
        .with_prompt("Select a plant")
        .items(&names)
        .default(0)
        .interact()?;

    templates
        .get(index)
        .context("Selection is outside the catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let template = lookup("monstera deliciosa").unwrap();
        assert_eq!(template.name, "Monstera deliciosa");
    }

    #[test]
    fn lookup_of_unknown_plant_suggests_catalog() {
        let error = lookup("Triffid").unwrap_err();
        assert!(error.to_string().contains("plant catalog"));
    }

    #[test]
    fn adopting_twice_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let command = || Command {
            name: Some("Calathea Kennedy".to_string()),
        };

        command().run(tmp.path()).unwrap();
        let error = command().run(tmp.path()).unwrap_err();

        assert!(error.to_string().contains("already in your collection"));
        assert_eq!(open_store(tmp.path()).unwrap().all().len(), 1);
    }
}
