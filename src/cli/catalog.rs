use clap::Parser;
use plantcare::domain::catalog;
use tracing::instrument;

use super::terminal::{self, Colorize};

#[derive(Debug, Parser)]
#[command(about = "List the plants that can be adopted")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Table => output_table(),
            OutputFormat::Json => output_json()?,
        }
        Ok(())
    }
}

fn output_table() {
    let templates = catalog::list();
    let width = templates
        .iter()
        .map(|template| template.name.chars().count())
        .max()
        .unwrap_or_default();

    if terminal::is_narrow() {
        for template in templates {
            println!("{}", template.name);
        }
        return;
    }

    let room = terminal::terminal_width().saturating_sub(width + 2).max(20);
    for template in templates {
        println!(
            "{:<width$}  {}",
            template.name,
            terminal::truncate(template.details, room).dim()
        );
    }
}

fn output_json() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(catalog::list())?);
    Ok(())
}
