//! Target paths and Python module paths for generated files

use crate::config::Config;
use std::path::{Component, Path, PathBuf};

/// Resolved project layout
///
/// Configured directories are joined onto `root`. Nothing here touches the
/// filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    models_dir: PathBuf,
    controllers_dir: PathBuf,
    routes_dir: PathBuf,
    repository_file: PathBuf,
    registration_file: PathBuf,
}

impl Layout {
    /// Resolve the configured layout against a project root
    #[must_use]
    pub fn new(root: &Path, config: &Config) -> Self {
        let layout = &config.layout;
        Self {
            root: root.to_path_buf(),
            models_dir: layout.models_dir.clone(),
            controllers_dir: layout.controllers_dir.clone(),
            routes_dir: layout.routes_dir.clone(),
            repository_file: layout.repository_file.clone(),
            registration_file: layout.registration_file.clone(),
        }
    }

    /// Model file for a resource (`src/models/<resource>.py`)
    #[must_use]
    pub fn model_path(&self, resource: &str) -> PathBuf {
        self.root.join(&self.models_dir).join(python_file(resource))
    }

    /// Controller file for a resource (`src/controllers/<resource>.py`)
    #[must_use]
    pub fn controller_path(&self, resource: &str) -> PathBuf {
        self.root.join(&self.controllers_dir).join(python_file(resource))
    }

    /// Route module for a resource (`src/routes/<resource>.py`)
    #[must_use]
    pub fn routes_path(&self, resource: &str) -> PathBuf {
        self.root.join(&self.routes_dir).join(python_file(resource))
    }

    /// The three generated files, in generation order
    #[must_use]
    pub fn artifact_paths(&self, resource: &str) -> [PathBuf; 3] {
        [
            self.model_path(resource),
            self.controller_path(resource),
            self.routes_path(resource),
        ]
    }

    /// Shared generic repository module
    #[must_use]
    pub fn repository_path(&self) -> PathBuf {
        self.root.join(&self.repository_file)
    }

    /// Registration file holding the router list
    #[must_use]
    pub fn registration_path(&self) -> PathBuf {
        self.root.join(&self.registration_file)
    }

    /// Dotted module of a generated model (`src.models.widget`)
    #[must_use]
    pub fn model_module(&self, resource: &str) -> String {
        join_module(&dotted(&self.models_dir), resource)
    }

    /// Dotted module of a generated controller (`src.controllers.widget`)
    #[must_use]
    pub fn controller_module(&self, resource: &str) -> String {
        join_module(&dotted(&self.controllers_dir), resource)
    }

    /// Dotted module of a generated route module (`src.routes.widget`)
    #[must_use]
    pub fn routes_module(&self, resource: &str) -> String {
        join_module(&dotted(&self.routes_dir), resource)
    }

    /// Dotted module of the generic repository
    #[must_use]
    pub fn repository_module(&self) -> String {
        dotted(&self.repository_file.with_extension(""))
    }

    /// Relative path for display, falling back to the full path
    #[must_use]
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

fn python_file(resource: &str) -> String {
    format!("{resource}.py")
}

fn join_module(package: &str, module: &str) -> String {
    if package.is_empty() {
        module.to_string()
    } else {
        format!("{package}.{module}")
    }
}

/// Convert a relative path into a dotted Python module path
///
/// ```
/// # use crudgen::layout::dotted;
/// # use std::path::Path;
/// assert_eq!(dotted(Path::new("src/routes")), "src.routes");
/// assert_eq!(dotted(Path::new("./app/models/")), "app.models");
/// ```
#[must_use]
pub fn dotted(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(Path::new("/project"), &Config::default())
    }

    #[test]
    fn test_artifact_paths() {
        let layout = layout();
        assert_eq!(
            layout.artifact_paths("widget"),
            [
                PathBuf::from("/project/src/models/widget.py"),
                PathBuf::from("/project/src/controllers/widget.py"),
                PathBuf::from("/project/src/routes/widget.py"),
            ]
        );
    }

    #[test]
    fn test_shared_paths() {
        let layout = layout();
        assert_eq!(
            layout.repository_path(),
            PathBuf::from("/project/src/repositories/generic_repository.py")
        );
        assert_eq!(
            layout.registration_path(),
            PathBuf::from("/project/src/private_routes.py")
        );
    }

    #[test]
    fn test_module_paths() {
        let layout = layout();
        assert_eq!(layout.model_module("widget"), "src.models.widget");
        assert_eq!(layout.controller_module("widget"), "src.controllers.widget");
        assert_eq!(layout.routes_module("widget"), "src.routes.widget");
        assert_eq!(
            layout.repository_module(),
            "src.repositories.generic_repository"
        );
    }

    #[test]
    fn test_module_paths_follow_config() {
        let mut config = Config::default();
        config.layout.routes_dir = PathBuf::from("routes");
        config.layout.repository_file = PathBuf::from("app/db/repo.py");
        let layout = Layout::new(Path::new("."), &config);
        assert_eq!(layout.routes_module("widget"), "routes.widget");
        assert_eq!(layout.repository_module(), "app.db.repo");
    }

    #[test]
    fn test_display_path() {
        let layout = layout();
        let path = layout.model_path("widget");
        assert_eq!(layout.display_path(&path), Path::new("src/models/widget.py"));
    }
}
