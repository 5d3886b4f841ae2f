//! Print the effective configuration

use anyhow::{Context, Result};
use crudgen::Config;

pub struct ConfigCommand;

impl ConfigCommand {
    pub fn execute(config: &Config) -> Result<()> {
        let rendered = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
        print!("{rendered}");
        Ok(())
    }
}
