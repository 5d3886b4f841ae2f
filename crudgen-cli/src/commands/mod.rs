//! CLI command implementations

pub mod config;
pub mod destroy;
pub mod scaffold;

pub use config::ConfigCommand;
pub use destroy::DestroyCommand;
pub use scaffold::ScaffoldCommand;

use console::{style, Emoji};
use crudgen::{EntryEdit, FormatterOutcome, ImportEdit, Layout, Registration};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "+ ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "- ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "! ");

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Report lines for a registration outcome
fn registration_lines(layout: &Layout, registration: &Registration) -> Vec<String> {
    match registration {
        Registration::FileMissing(path) => vec![format!(
            "  {WARN}{} not found, routes not registered",
            style(layout.display_path(path).display()).yellow()
        )],
        Registration::Patched(report) => {
            let import = match report.import {
                ImportEdit::Added => format!("  {CHECK}import added"),
                ImportEdit::Removed => format!("  {CROSS}import removed"),
                ImportEdit::Unchanged => format!("  {}", style("import unchanged").dim()),
            };
            let entry = match &report.entry {
                Ok(EntryEdit::Added) => format!("  {CHECK}router registered"),
                Ok(EntryEdit::Removed) => format!("  {CROSS}router deregistered"),
                Ok(EntryEdit::AlreadyPresent) => {
                    format!("  {}", style("router already registered").dim())
                }
                Ok(EntryEdit::NotPresent) => {
                    format!("  {}", style("router was not registered").dim())
                }
                Err(err) => format!(
                    "  {WARN}{}",
                    style(format!("{err}, routes not registered")).yellow()
                ),
            };
            vec![import, entry]
        }
    }
}

fn print_formatter(formatter: &FormatterOutcome) {
    match formatter {
        FormatterOutcome::Skipped => {}
        FormatterOutcome::Succeeded => println!("  {CHECK}formatted"),
        FormatterOutcome::Failed(failure) => {
            println!("  {WARN}{}", style(format!("formatter failed: {failure}")).yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen::{Config, PatchReport, RegistrationBlockNotFound};
    use std::path::Path;

    fn plain(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| console::strip_ansi_codes(line).into_owned())
            .collect()
    }

    #[test]
    fn test_missing_block_is_reported() {
        let layout = Layout::new(Path::new("/project"), &Config::default());
        let registration = Registration::Patched(PatchReport {
            import: ImportEdit::Added,
            entry: Err(RegistrationBlockNotFound {
                list_name: "private_routes".to_string(),
            }),
        });

        let lines = plain(&registration_lines(&layout, &registration));

        assert!(lines[0].contains("import added"));
        assert!(lines[1].contains("no `private_routes = [...]` declaration found"));
        assert!(lines[1].contains("routes not registered"));
    }

    #[test]
    fn test_missing_file_shown_relative_to_root() {
        let layout = Layout::new(Path::new("/project"), &Config::default());
        let registration = Registration::FileMissing(layout.registration_path());

        let lines = plain(&registration_lines(&layout, &registration));

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("src/private_routes.py not found"));
        assert!(!lines[0].contains("/project"));
    }
}
