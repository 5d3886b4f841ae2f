//! crudgen CLI tool

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod observability;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{ConfigCommand, DestroyCommand, ScaffoldCommand};
use crudgen::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Scaffold FastAPI/SQLModel CRUD resources", long_about = None)]
struct Cli {
    /// Project root containing `src/`
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file (default: `<root>/crudgen.toml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model, controller and routes for a resource
    Scaffold {
        /// Resource name (a Python identifier, e.g. `widget`)
        resource: String,
        /// Field definitions (e.g. `name:str price:Decimal` or `"name:str,price:Decimal"`)
        #[arg(required = true)]
        fields: Vec<String>,
        /// Do not run the formatter afterwards
        #[arg(long)]
        no_format: bool,
        /// Show what would be written without touching the project
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove a resource's files and deregister its routes
    Destroy {
        /// Resource name
        resource: String,
        /// Do not run the formatter afterwards
        #[arg(long)]
        no_format: bool,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    observability::init(cli.log_json)?;

    let config = Config::load(&cli.root, cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Scaffold {
            resource,
            fields,
            no_format,
            dry_run,
        } => {
            let cmd = ScaffoldCommand::new(resource, &fields, dry_run);
            cmd.execute(&with_formatter(config, no_format), &cli.root)?;
        }
        Commands::Destroy {
            resource,
            no_format,
            yes,
        } => {
            let cmd = DestroyCommand::new(resource, yes);
            cmd.execute(&with_formatter(config, no_format), &cli.root)?;
        }
        Commands::Config => {
            ConfigCommand::execute(&config)?;
        }
    }

    Ok(())
}

fn with_formatter(config: Config, no_format: bool) -> Config {
    if no_format {
        config.without_formatter()
    } else {
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scaffold_args() {
        let cli = Cli::parse_from([
            "crudgen", "--root", "/srv/api", "scaffold", "widget", "name:str", "price:Decimal",
            "--dry-run",
        ]);
        assert_eq!(cli.root, PathBuf::from("/srv/api"));
        match cli.command {
            Commands::Scaffold {
                resource,
                fields,
                no_format,
                dry_run,
            } => {
                assert_eq!(resource, "widget");
                assert_eq!(fields, ["name:str", "price:Decimal"]);
                assert!(!no_format);
                assert!(dry_run);
            }
            _ => panic!("expected scaffold"),
        }
    }

    #[test]
    fn test_scaffold_requires_fields() {
        assert!(Cli::try_parse_from(["crudgen", "scaffold", "widget"]).is_err());
    }

    #[test]
    fn test_destroy_args() {
        let cli = Cli::parse_from(["crudgen", "destroy", "widget", "-y", "--no-format"]);
        assert!(matches!(
            cli.command,
            Commands::Destroy { ref resource, no_format: true, yes: true } if resource == "widget"
        ));
    }

    #[test]
    fn test_no_format_disables_formatter() {
        assert!(!with_formatter(Config::default(), true).formatter.enabled);
        assert!(with_formatter(Config::default(), false).formatter.enabled);
    }
}
