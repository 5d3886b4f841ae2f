//! `crudgen destroy`: remove a generated resource

use super::{print_formatter, print_lines, registration_lines, CROSS};
use anyhow::{Context, Result};
use console::{style, Term};
use crudgen::{destroy, Config, Layout};
use dialoguer::Confirm;
use std::path::Path;

pub struct DestroyCommand {
    resource: String,
    yes: bool,
}

impl DestroyCommand {
    pub const fn new(resource: String, yes: bool) -> Self {
        Self { resource, yes }
    }

    pub fn execute(&self, config: &Config, root: &Path) -> Result<()> {
        if !self.confirmed()? {
            println!("Aborted.");
            return Ok(());
        }

        println!(
            "\n{} {}",
            style("Destroying").cyan().bold(),
            style(&self.resource).red().bold()
        );

        let report = destroy(config, root, &self.resource)
            .with_context(|| format!("Failed to destroy '{}'", self.resource))?;

        let layout = Layout::new(root, config);
        if report.removed.is_empty() {
            println!("  {}", style("no generated files found").dim());
        }
        for path in &report.removed {
            println!("  {CROSS}{}", style(layout.display_path(path).display()).dim());
        }
        print_lines(&registration_lines(&layout, &report.registration));
        print_formatter(&report.formatter);

        Ok(())
    }

    /// Prompt only when someone is there to answer
    fn confirmed(&self) -> Result<bool> {
        if self.yes || !Term::stderr().is_term() {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(format!(
                "Remove the generated files for '{}' and deregister its routes?",
                self.resource
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_skips_prompt() {
        let cmd = DestroyCommand::new("widget".to_string(), true);
        assert!(cmd.confirmed().unwrap());
    }
}
