//! Configuration for crudgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDGEN_` prefix, `__` for nesting)
//! 2. `crudgen.toml` in the project root, or an explicit file
//! 3. Hardcoded defaults (fallback)
//!
//! Environment variable format: `CRUDGEN_SECTION__FIELD_NAME`
//! - Example: `CRUDGEN_LAYOUT__ROUTES_DIR=app/routes`
//! - Example: `CRUDGEN_FORMATTER__ENABLED=false`
//!
//! # Example Configuration
//!
//! ```toml
//! # crudgen.toml
//! [layout]
//! models_dir = "src/models"
//! controllers_dir = "src/controllers"
//! routes_dir = "src/routes"
//! repository_file = "src/repositories/generic_repository.py"
//! registration_file = "src/private_routes.py"
//! registration_list = "private_routes"
//!
//! [auth]
//! module = "src.security.verify_jwt_token"
//! dependency = "verify_jwt_token"
//!
//! [formatter]
//! enabled = true
//! command = ["ruff", "format", "src"]
//! ```

use crate::error::{Error, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const CONFIG_FILE: &str = "crudgen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CRUDGEN_";

/// Where generated files live, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Directory for generated models
    pub models_dir: PathBuf,
    /// Directory for generated controllers
    pub controllers_dir: PathBuf,
    /// Directory for generated route modules
    pub routes_dir: PathBuf,
    /// Shared generic repository module
    pub repository_file: PathBuf,
    /// File holding the list of mounted routers
    pub registration_file: PathBuf,
    /// Name of the list variable inside the registration file
    pub registration_list: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("src/models"),
            controllers_dir: PathBuf::from("src/controllers"),
            routes_dir: PathBuf::from("src/routes"),
            repository_file: PathBuf::from("src/repositories/generic_repository.py"),
            registration_file: PathBuf::from("src/private_routes.py"),
            registration_list: "private_routes".to_string(),
        }
    }
}

/// Authentication guard injected into every generated router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Python module exporting the dependency
    pub module: String,
    /// Dependency callable passed to `Depends(...)`
    pub dependency: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            module: "src.security.verify_jwt_token".to_string(),
            dependency: "verify_jwt_token".to_string(),
        }
    }
}

/// Code formatter run after scaffold and destroy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterSettings {
    /// Run the formatter at all
    pub enabled: bool,
    /// Program and arguments, run from the project root
    pub command: Vec<String>,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["ruff".to_string(), "format".to_string(), "src".to_string()],
        }
    }
}

/// Complete crudgen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output layout
    pub layout: LayoutSettings,
    /// Router authentication guard
    pub auth: AuthSettings,
    /// Post-generation formatter
    pub formatter: FormatterSettings,
}

impl Config {
    /// Load configuration for a project root
    ///
    /// Reads `<root>/crudgen.toml` when present, or `file` when given, then
    /// applies `CRUDGEN_` environment overrides. The project file is optional;
    /// an explicit `file` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if `file` is given but missing, or an error if a
    /// configuration source cannot be parsed.
    pub fn load(root: &Path, file: Option<&Path>) -> Result<Self> {
        if let Some(explicit) = file.filter(|path| !path.is_file()) {
            return Err(Error::io(
                explicit,
                io::Error::new(io::ErrorKind::NotFound, "configuration file not found"),
            ));
        }

        let file = file.map_or_else(|| root.join(CONFIG_FILE), Path::to_path_buf);
        let config: Self = Self::figment(&file).extract().map_err(Box::new)?;
        tracing::debug!(file = %file.display(), "loaded configuration");
        Ok(config)
    }

    /// Build the layered figment without extracting it
    #[must_use]
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Return a copy with the formatter switched off
    #[must_use]
    pub fn without_formatter(mut self) -> Self {
        self.formatter.enabled = false;
        self
    }
}
