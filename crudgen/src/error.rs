//! Scaffolding error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scaffolding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures that abort a scaffold or destroy run.
///
/// Soft outcomes (missing registration block, missing registration file,
/// formatter failure) are reported as values on the run reports instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A field token is not of the form `name:type`.
    #[error("invalid field '{token}': expected name:type")]
    MalformedField {
        /// Offending token, as given on the command line
        token: String,
    },

    /// The same field name appears twice in one resource.
    #[error("duplicate field '{name}'")]
    DuplicateField {
        /// Repeated field name
        name: String,
    },

    /// A field name collides with the generated primary key.
    #[error("field '{name}' is reserved for the generated primary key")]
    ReservedField {
        /// Reserved field name
        name: String,
    },

    /// The resource name cannot be used as a Python identifier.
    #[error("invalid resource name '{name}': must match [A-Za-z_][A-Za-z0-9_]* and not be a Python keyword")]
    InvalidResourceName {
        /// Rejected resource name
        name: String,
    },

    /// Reading, writing or deleting a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A built-in template failed to compile.
    #[error("failed to register template: {0}")]
    TemplateRegistration(#[from] Box<handlebars::TemplateError>),

    /// A template failed to render.
    #[error("failed to render template: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-field error for a token
    #[must_use]
    pub fn malformed_field<T: Into<String>>(token: T) -> Self {
        Self::MalformedField {
            token: token.into(),
        }
    }
}
