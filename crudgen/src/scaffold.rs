//! Scaffold and destroy orchestration
//!
//! Both runs are fail-fast on hard errors and never roll back. Soft outcomes
//! (missing registration file or block, formatter failure) are logged and
//! recorded on the returned report.

use crate::config::Config;
use crate::error::Result;
use crate::field::{router_name, validate_resource_name, ResourceSpec};
use crate::format::{run_formatter, FormatterFailure};
use crate::layout::Layout;
use crate::registry::{self, Edit, PatchReport, RegistrationFile};
use crate::render::Renderer;
use crate::writer;
use std::path::{Path, PathBuf};

/// What happened to the registration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// File loaded and edited (possibly with nothing to change)
    Patched(PatchReport),
    /// No registration file at the configured path
    FileMissing(PathBuf),
}

/// What happened with the post-run formatter
#[derive(Debug)]
pub enum FormatterOutcome {
    /// Disabled by configuration or `--no-format`
    Skipped,
    /// Formatter exited successfully
    Succeeded,
    /// Formatter could not run or failed; the run itself still succeeded
    Failed(FormatterFailure),
}

/// Result of [`scaffold`]
#[derive(Debug)]
pub struct ScaffoldReport {
    /// Resource name
    pub resource: String,
    /// Model, controller and route module, in that order
    pub written: Vec<PathBuf>,
    /// Whether the generic repository was created by this run
    pub repository_created: bool,
    /// Registration outcome
    pub registration: Registration,
    /// Formatter outcome
    pub formatter: FormatterOutcome,
}

/// Result of [`destroy`]
#[derive(Debug)]
pub struct DestroyReport {
    /// Resource name
    pub resource: String,
    /// Files that existed and were deleted
    pub removed: Vec<PathBuf>,
    /// Deregistration outcome
    pub registration: Registration,
    /// Formatter outcome
    pub formatter: FormatterOutcome,
}

/// Everything [`scaffold`] would do, computed without touching the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    /// Resource name
    pub resource: String,
    /// Target path and full content of each generated file
    pub files: Vec<(PathBuf, String)>,
    /// Generic repository path, if it would be created
    pub repository: Option<PathBuf>,
    /// Registration file path
    pub registration_path: PathBuf,
    /// Registration text before and after, if the file exists
    pub registration_diff: Option<(String, String)>,
    /// Registration outcome the run would report
    pub registration: Registration,
}

/// Generate a resource and register its router
///
/// # Errors
///
/// Returns an error if the resource name or field list is invalid (nothing is
/// written in that case), or if any file cannot be read or written.
pub fn scaffold(
    config: &Config,
    root: &Path,
    resource: &str,
    raw_fields: &str,
) -> Result<ScaffoldReport> {
    let spec = ResourceSpec::new(resource, raw_fields)?;
    let layout = Layout::new(root, config);
    let renderer = Renderer::new()?;

    let repository_created = writer::ensure_shared_repository(&layout)?;
    let rendered = renderer.render(&spec, &layout, &config.auth)?;
    let written = writer::write_artifacts(&layout, &spec, &rendered)?;

    let (import_line, entry) = registration_target(&layout, resource);
    let path = layout.registration_path();
    let registration = match registry::add_entry(
        &path,
        &config.layout.registration_list,
        &import_line,
        &entry,
    )? {
        Some(report) => Registration::Patched(report),
        None => Registration::FileMissing(path),
    };
    log_registration(&registration, Edit::Add);

    let formatter = format_project(config, root);

    tracing::info!(%resource, files = written.len(), "scaffold complete");

    Ok(ScaffoldReport {
        resource: resource.to_string(),
        written,
        repository_created,
        registration,
        formatter,
    })
}

/// Remove a resource's files and deregister its router
///
/// # Errors
///
/// Returns an error if the resource name is invalid, or if a file cannot be
/// deleted or the registration file cannot be rewritten.
pub fn destroy(config: &Config, root: &Path, resource: &str) -> Result<DestroyReport> {
    validate_resource_name(resource)?;
    let layout = Layout::new(root, config);

    let removed = writer::remove_artifacts(&layout, resource)?;

    let (import_line, entry) = registration_target(&layout, resource);
    let path = layout.registration_path();
    let registration = match registry::remove_entry(
        &path,
        &config.layout.registration_list,
        &import_line,
        &entry,
    )? {
        Some(report) => Registration::Patched(report),
        None => Registration::FileMissing(path),
    };
    log_registration(&registration, Edit::Remove);

    let formatter = format_project(config, root);

    tracing::info!(%resource, files = removed.len(), "destroy complete");

    Ok(DestroyReport {
        resource: resource.to_string(),
        removed,
        registration,
        formatter,
    })
}

/// Compute a scaffold run in memory
///
/// # Errors
///
/// Returns the same validation errors as [`scaffold`], or an error if the
/// registration file exists but cannot be read.
pub fn plan_scaffold(
    config: &Config,
    root: &Path,
    resource: &str,
    raw_fields: &str,
) -> Result<ScaffoldPlan> {
    let spec = ResourceSpec::new(resource, raw_fields)?;
    let layout = Layout::new(root, config);
    let rendered = Renderer::new()?.render(&spec, &layout, &config.auth)?;

    let [model, controller, routes] = layout.artifact_paths(resource);
    let files = vec![
        (model, rendered.model),
        (controller, rendered.controller),
        (routes, rendered.routes),
    ];

    let repository = Some(layout.repository_path()).filter(|path| !path.exists());

    let (import_line, entry) = registration_target(&layout, resource);
    let registration_path = layout.registration_path();
    let (registration_diff, registration) =
        match RegistrationFile::load(&registration_path, &config.layout.registration_list)? {
            Some(mut file) => {
                let before = file.render();
                let report = file.apply(Edit::Add, &import_line, &entry);
                (Some((before, file.render())), Registration::Patched(report))
            }
            None => (None, Registration::FileMissing(registration_path.clone())),
        };

    Ok(ScaffoldPlan {
        resource: resource.to_string(),
        files,
        repository,
        registration_path,
        registration_diff,
        registration,
    })
}

/// Import line and list entry registering a resource's router
fn registration_target(layout: &Layout, resource: &str) -> (String, String) {
    let router = router_name(resource);
    let import_line = format!("from {} import {router}", layout.routes_module(resource));
    (import_line, router)
}

fn log_registration(registration: &Registration, edit: Edit) {
    match registration {
        Registration::FileMissing(path) => {
            tracing::warn!(path = %path.display(), "registration file not found, skipping");
        }
        Registration::Patched(report) => match &report.entry {
            Ok(entry) => {
                tracing::info!(?edit, import = ?report.import, ?entry, "updated registration");
            }
            Err(err) => {
                tracing::warn!(?edit, import = ?report.import, "{err}, route list left unchanged");
            }
        },
    }
}

fn format_project(config: &Config, root: &Path) -> FormatterOutcome {
    if !config.formatter.enabled {
        return FormatterOutcome::Skipped;
    }

    match run_formatter(&config.formatter.command, root) {
        Ok(()) => FormatterOutcome::Succeeded,
        Err(failure) => {
            tracing::warn!(error = %failure, "formatter failed");
            FormatterOutcome::Failed(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::registry::{EntryEdit, ImportEdit};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const REGISTRATION: &str = "from src.routes.items import items_routes\n\nprivate_routes = [items_routes]\n";

    fn project() -> TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/private_routes.py"), REGISTRATION).unwrap();
        dir
    }

    fn config() -> Config {
        Config::default().without_formatter()
    }

    #[test]
    fn test_scaffold_writes_and_registers() {
        let dir = project();
        let report = scaffold(&config(), dir.path(), "widget", "name:str").unwrap();

        assert_eq!(report.written.len(), 3);
        assert!(report.repository_created);
        assert!(matches!(report.formatter, FormatterOutcome::Skipped));
        assert_eq!(
            report.registration,
            Registration::Patched(PatchReport {
                import: ImportEdit::Added,
                entry: Ok(EntryEdit::Added),
            })
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("src/private_routes.py")).unwrap(),
            "from src.routes.widget import widget_routes\n\
             from src.routes.items import items_routes\n\
             \n\
             private_routes = [items_routes, widget_routes]\n"
        );
    }

    #[test]
    fn test_scaffold_rejects_bad_fields_before_writing() {
        let dir = project();
        let err = scaffold(&config(), dir.path(), "widget", "name:str,broken").unwrap_err();

        assert!(matches!(err, Error::MalformedField { ref token } if token == "broken"));
        assert!(!dir.path().join("src/models").exists());
        assert!(!dir.path().join("src/repositories").exists());
    }

    #[test]
    fn test_destroy_rejects_path_like_names() {
        let dir = project();
        assert!(matches!(
            destroy(&config(), dir.path(), "../items"),
            Err(Error::InvalidResourceName { .. })
        ));
    }

    #[test]
    fn test_destroy_without_registration_file() {
        let dir = tempdir().unwrap();
        let report = destroy(&config(), dir.path(), "widget").unwrap();

        assert!(report.removed.is_empty());
        assert_eq!(
            report.registration,
            Registration::FileMissing(dir.path().join("src/private_routes.py"))
        );
    }

    #[test]
    fn test_plan_touches_nothing() {
        let dir = project();
        let plan = plan_scaffold(&config(), dir.path(), "widget", "name:str").unwrap();

        assert_eq!(plan.files.len(), 3);
        assert_eq!(
            plan.repository,
            Some(dir.path().join("src/repositories/generic_repository.py"))
        );
        let (before, after) = plan.registration_diff.unwrap();
        assert_eq!(before, REGISTRATION);
        assert!(after.ends_with("private_routes = [items_routes, widget_routes]\n"));

        assert!(!dir.path().join("src/models").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("src/private_routes.py")).unwrap(),
            REGISTRATION
        );
    }

    #[test]
    fn test_plan_matches_scaffold_output() {
        let dir = project();
        let plan = plan_scaffold(&config(), dir.path(), "widget", "a:Decimal,b:int").unwrap();
        scaffold(&config(), dir.path(), "widget", "a:Decimal,b:int").unwrap();

        for (path, content) in &plan.files {
            assert_eq!(&fs::read_to_string(path).unwrap(), content);
        }
        let (_, after) = plan.registration_diff.unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("src/private_routes.py")).unwrap(),
            after
        );
    }

    #[test]
    fn test_formatter_failure_is_soft() {
        let dir = project();
        let mut config = Config::default();
        config.formatter.command = vec!["crudgen-no-such-formatter".to_string()];

        let report = scaffold(&config, dir.path(), "widget", "name:str").unwrap();

        assert!(matches!(
            report.formatter,
            FormatterOutcome::Failed(FormatterFailure::Spawn { .. })
        ));
        assert_eq!(report.written.len(), 3);
    }
}
