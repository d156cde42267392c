use std::path::Path;

use anyhow::Context;
use plantcare::Config;
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
/// Show or modify configuration settings
///
/// Configuration is stored in config.toml next to the plant collection.
///
/// Available configuration keys:
///   `threshold_days`  Days without water before a plant needs water
/// (default: 7)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        ///
        /// Available keys: `threshold_days`
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   plant config set `threshold_days` 5
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

/// The configuration keys, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    ThresholdDays,
}

impl Key {
    fn parse(key: &str) -> anyhow::Result<Self> {
        match key {
            "threshold_days" | "threshold-days" => Ok(Self::ThresholdDays),
            _ => anyhow::bail!(
                "Unknown configuration key: '{key}'\n\nAvailable keys:\n  threshold_days"
            ),
        }
    }
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(Config::FILE_NAME);

        match self.command {
            ConfigCommand::Show => Self::show_config(&config_path),
            ConfigCommand::Get { key } => Self::get_config(&config_path, &key),
            ConfigCommand::Set { key, value } => Self::set_config(&config_path, &key, &value),
        }
    }

    fn show_config(config_path: &Path) -> anyhow::Result<()> {
        let config = load(config_path)?;

        println!("Configuration:");
        println!(
            "  threshold_days: {} {}",
            config.threshold_days(),
            if config.threshold_days() == plantcare::Threshold::DEFAULT_DAYS {
                "(default)".dim()
            } else {
                String::new()
            }
        );
        Ok(())
    }

    fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
        let config = load(config_path)?;

        match Key::parse(key)? {
            Key::ThresholdDays => println!("{}", config.threshold_days()),
        }
        Ok(())
    }

    fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = load(config_path)?;

        match Key::parse(key)? {
            Key::ThresholdDays => {
                let days = value
                    .parse::<u32>()
                    .context("Value must be a whole number of days")?;
                config
                    .set_threshold_days(days)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                config
                    .save(config_path)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("{} threshold_days = {days}", "Set".success());
            }
        }
        Ok(())
    }
}

fn load(config_path: &Path) -> anyhow::Result<Config> {
    if config_path.exists() {
        Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))
    } else {
        Ok(Config::default())
    }
}
