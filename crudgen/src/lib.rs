//! crudgen: scaffolding engine for FastAPI/SQLModel resources
//!
//! Given a resource name and a `name:type` field list, crudgen renders a
//! SQLModel model, a controller forwarding to a shared generic repository and
//! a JWT-guarded route module, then registers the router in the project's
//! `private_routes` list. [`destroy`] undoes all of it.
//!
//! # Example
//!
//! ```rust,no_run
//! use crudgen::{scaffold, Config};
//! use std::path::Path;
//!
//! # fn main() -> crudgen::Result<()> {
//! let config = Config::default();
//! let report = scaffold(&config, Path::new("."), "widget", "name:str,price:Decimal")?;
//! for path in &report.written {
//!     println!("wrote {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod artifact;
pub mod config;
pub mod error;
pub mod field;
pub mod format;
pub mod layout;
pub mod registry;
pub mod render;
pub mod scaffold;
pub mod templates;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use field::{parse_fields, FieldSpec, ParsedFields, ResourceSpec};
pub use layout::Layout;
pub use registry::{
    Edit, EntryEdit, ImportEdit, PatchReport, RegistrationBlockNotFound, RegistrationFile,
};
pub use render::{RenderedArtifacts, Renderer};
pub use scaffold::{
    destroy, plan_scaffold, scaffold, DestroyReport, FormatterOutcome, Registration,
    ScaffoldPlan, ScaffoldReport,
};
