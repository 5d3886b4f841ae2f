//! `crudgen scaffold`: generate a CRUD resource
//!
//! ```bash
//! crudgen scaffold widget name:str price:Decimal active:bool
//! crudgen scaffold widget "name:str,price:Decimal" --dry-run
//! ```

use super::{print_formatter, print_lines, registration_lines, CHECK};
use anyhow::{Context, Result};
use console::style;
use crudgen::{plan_scaffold, scaffold, Config, Layout, ScaffoldPlan};
use similar::{ChangeTag, TextDiff};
use std::path::Path;

pub struct ScaffoldCommand {
    resource: String,
    fields: String,
    dry_run: bool,
}

impl ScaffoldCommand {
    /// Field arguments are joined with `,`, so `a:str b:int` equals `a:str,b:int`
    pub fn new(resource: String, fields: &[String], dry_run: bool) -> Self {
        Self {
            resource,
            fields: fields.join(","),
            dry_run,
        }
    }

    pub fn execute(&self, config: &Config, root: &Path) -> Result<()> {
        if self.dry_run {
            let plan = plan_scaffold(config, root, &self.resource, &self.fields)
                .with_context(|| format!("Failed to plan scaffold for '{}'", self.resource))?;
            print_lines(&plan_lines(&Layout::new(root, config), &plan));
            return Ok(());
        }

        println!(
            "\n{} {}",
            style("Scaffolding").cyan().bold(),
            style(&self.resource).green().bold()
        );

        let report = scaffold(config, root, &self.resource, &self.fields)
            .with_context(|| format!("Failed to scaffold '{}'", self.resource))?;

        let layout = Layout::new(root, config);
        if report.repository_created {
            println!(
                "  {CHECK}{} {}",
                style(layout.display_path(&layout.repository_path()).display()).dim(),
                style("(generic repository)").dim()
            );
        }
        for path in &report.written {
            println!("  {CHECK}{}", style(layout.display_path(path).display()).dim());
        }
        print_lines(&registration_lines(&layout, &report.registration));
        print_formatter(&report.formatter);

        println!(
            "\n{} {} is ready",
            style("Done:").green().bold(),
            style(&self.resource).green().bold()
        );

        Ok(())
    }
}

/// Dry-run report: planned files, registration diff and outcome
fn plan_lines(layout: &Layout, plan: &ScaffoldPlan) -> Vec<String> {
    let mut lines = vec![format!(
        "\n{} {} {}",
        style("Dry run for").cyan().bold(),
        style(&plan.resource).green().bold(),
        style("(nothing written)").dim()
    )];

    if let Some(repository) = &plan.repository {
        lines.push(format!(
            "  would create {}",
            style(layout.display_path(repository).display()).dim()
        ));
    }
    for (path, content) in &plan.files {
        lines.push(format!(
            "  would write {} ({} lines)",
            style(layout.display_path(path).display()).dim(),
            content.lines().count()
        ));
    }

    if let Some((before, after)) = &plan.registration_diff {
        lines.push(format!(
            "\n{}",
            style(layout.display_path(&plan.registration_path).display()).bold()
        ));
        if before == after {
            lines.push(format!("  {}", style("no changes").dim()));
        }
        for change in TextDiff::from_lines(before, after).iter_all_changes() {
            let text = change.value().trim_end_matches('\n');
            lines.push(match change.tag() {
                ChangeTag::Delete => style(format!("-{text}")).red().to_string(),
                ChangeTag::Insert => style(format!("+{text}")).green().to_string(),
                ChangeTag::Equal => format!(" {text}"),
            });
        }
        lines.push(String::new());
    }

    lines.extend(registration_lines(layout, &plan.registration));
    lines
}
