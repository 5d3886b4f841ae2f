//! Registration file patcher
//!
//! The registration file (`src/private_routes.py` by default) imports every
//! generated router and lists them in one assignment:
//!
//! ```python
//! from src.routes.items import items_routes
//! from src.routes.orders import orders_routes
//!
//! private_routes = [items_routes, orders_routes]
//! ```
//!
//! [`RegistrationFile`] splits that text into the part before the list body,
//! the list entries and the part after it. Edits touch only the import lines
//! and the list membership; everything else is written back byte for byte,
//! and the list body itself is only re-serialised when its membership
//! changes.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// The list assignment could not be located in the registration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no `{list_name} = [...]` declaration found")]
pub struct RegistrationBlockNotFound {
    /// List variable that was searched for
    pub list_name: String,
}

/// Outcome of an import-line edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportEdit {
    /// Line prepended to the file
    Added,
    /// Line deleted
    Removed,
    /// Nothing to do
    Unchanged,
}

/// Outcome of a list-entry edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEdit {
    /// Entry appended
    Added,
    /// Entry was already listed
    AlreadyPresent,
    /// Entry removed
    Removed,
    /// Entry was not listed
    NotPresent,
}

/// Direction of a registration edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Register a router
    Add,
    /// Deregister a router
    Remove,
}

/// What one add/remove call did to the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    /// Import-line edit
    pub import: ImportEdit,
    /// List-entry edit, or why it was skipped
    pub entry: std::result::Result<EntryEdit, RegistrationBlockNotFound>,
}

impl PatchReport {
    /// Whether the file text changed
    #[must_use]
    pub fn changed(&self) -> bool {
        self.import != ImportEdit::Unchanged
            || matches!(self.entry, Ok(EntryEdit::Added | EntryEdit::Removed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteList {
    /// Body text between the brackets, as found
    raw: String,
    entries: Vec<String>,
    edited: bool,
}

impl RouteList {
    fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            entries: raw
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
            edited: false,
        }
    }

    fn add(&mut self, entry: &str) -> EntryEdit {
        if self.entries.iter().any(|e| e == entry) {
            return EntryEdit::AlreadyPresent;
        }
        self.entries.push(entry.to_string());
        self.edited = true;
        EntryEdit::Added
    }

    fn remove(&mut self, entry: &str) -> EntryEdit {
        let before = self.entries.len();
        self.entries.retain(|e| e != entry);
        if self.entries.len() == before {
            return EntryEdit::NotPresent;
        }
        self.edited = true;
        EntryEdit::Removed
    }

    fn body(&self) -> String {
        if self.edited {
            self.entries.join(", ")
        } else {
            self.raw.clone()
        }
    }
}

/// In-memory model of a registration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFile {
    list_name: String,
    /// Text up to and including the `[` opener (the whole file without a block)
    head: String,
    list: Option<RouteList>,
    /// Text from the closing `]` to the end of the file
    tail: String,
}

impl RegistrationFile {
    /// Parse registration file text
    ///
    /// Locates the first `<list_name> = [ ... ]` assignment; whitespace around
    /// `=` and inside the brackets may include newlines.
    ///
    /// ```
    /// # use crudgen::RegistrationFile;
    /// let file = RegistrationFile::parse("private_routes = [\n    a_routes,\n]\n", "private_routes");
    /// assert_eq!(file.entries().unwrap(), ["a_routes"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str, list_name: &str) -> Self {
        let opener = Regex::new(&format!(r"\b{}\s*=\s*\[", regex::escape(list_name)))
            .ok()
            .and_then(|re| re.find(text));

        let span = opener.and_then(|open| {
            text[open.end()..]
                .find(']')
                .map(|offset| (open.end(), open.end() + offset))
        });

        match span {
            Some((body_start, body_end)) => Self {
                list_name: list_name.to_string(),
                head: text[..body_start].to_string(),
                list: Some(RouteList::parse(&text[body_start..body_end])),
                tail: text[body_end..].to_string(),
            },
            None => Self {
                list_name: list_name.to_string(),
                head: text.to_string(),
                list: None,
                tail: String::new(),
            },
        }
    }

    /// Load a registration file from disk
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path, list_name: &str) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::parse(&text, list_name))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::io(path, err)),
        }
    }

    /// Serialise back to text
    #[must_use]
    pub fn render(&self) -> String {
        let body = self.list.as_ref().map(RouteList::body).unwrap_or_default();
        format!("{}{body}{}", self.head, self.tail)
    }

    /// Write the file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|err| Error::io(path, err))
    }

    /// Entries of the router list, if the list was found
    #[must_use]
    pub fn entries(&self) -> Option<&[String]> {
        self.list.as_ref().map(|list| list.entries.as_slice())
    }

    /// Whether a line equal to `import_line` exists outside the list body
    #[must_use]
    pub fn has_import(&self, import_line: &str) -> bool {
        self.head
            .lines()
            .chain(self.tail.lines())
            .any(|line| line == import_line)
    }

    /// Prepend `import_line` unless it is already present
    pub fn add_import(&mut self, import_line: &str) -> ImportEdit {
        if self.has_import(import_line) {
            return ImportEdit::Unchanged;
        }
        self.head.insert_str(0, &format!("{import_line}\n"));
        ImportEdit::Added
    }

    /// Delete every line equal to `import_line`, with its newline
    pub fn remove_import(&mut self, import_line: &str) -> ImportEdit {
        let head = remove_line(&self.head, import_line);
        let tail = remove_line(&self.tail, import_line);
        if head.is_none() && tail.is_none() {
            return ImportEdit::Unchanged;
        }
        if let Some(head) = head {
            self.head = head;
        }
        if let Some(tail) = tail {
            self.tail = tail;
        }
        ImportEdit::Removed
    }

    /// Append an entry to the router list unless already listed
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationBlockNotFound`] if the file has no router list.
    pub fn add_entry(
        &mut self,
        entry: &str,
    ) -> std::result::Result<EntryEdit, RegistrationBlockNotFound> {
        Ok(self.list_mut()?.add(entry))
    }

    /// Remove an entry from the router list
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationBlockNotFound`] if the file has no router list.
    pub fn remove_entry(
        &mut self,
        entry: &str,
    ) -> std::result::Result<EntryEdit, RegistrationBlockNotFound> {
        Ok(self.list_mut()?.remove(entry))
    }

    /// Apply both edits (import line and list entry) in one direction
    pub fn apply(&mut self, edit: Edit, import_line: &str, entry: &str) -> PatchReport {
        match edit {
            Edit::Add => PatchReport {
                import: self.add_import(import_line),
                entry: self.add_entry(entry),
            },
            Edit::Remove => PatchReport {
                import: self.remove_import(import_line),
                entry: self.remove_entry(entry),
            },
        }
    }

    fn list_mut(&mut self) -> std::result::Result<&mut RouteList, RegistrationBlockNotFound> {
        let list_name = &self.list_name;
        self.list.as_mut().ok_or_else(|| RegistrationBlockNotFound {
            list_name: list_name.clone(),
        })
    }
}

/// Remove lines equal to `line`; `None` when nothing matched
fn remove_line(text: &str, line: &str) -> Option<String> {
    let mut removed = false;
    let kept: String = text
        .split_inclusive('\n')
        .filter(|segment| {
            let content = segment.strip_suffix('\n').unwrap_or(segment);
            let content = content.strip_suffix('\r').unwrap_or(content);
            let matches = content == line;
            removed |= matches;
            !matches
        })
        .collect();
    removed.then_some(kept)
}

/// Register a router in the registration file at `path`
///
/// Returns `Ok(None)` when the file does not exist. The file is only written
/// when its text changes.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn add_entry(
    path: &Path,
    list_name: &str,
    import_line: &str,
    entry: &str,
) -> Result<Option<PatchReport>> {
    patch(path, list_name, Edit::Add, import_line, entry)
}

/// Deregister a router from the registration file at `path`
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn remove_entry(
    path: &Path,
    list_name: &str,
    import_line: &str,
    entry: &str,
) -> Result<Option<PatchReport>> {
    patch(path, list_name, Edit::Remove, import_line, entry)
}

fn patch(
    path: &Path,
    list_name: &str,
    edit: Edit,
    import_line: &str,
    entry: &str,
) -> Result<Option<PatchReport>> {
    let Some(mut file) = RegistrationFile::load(path, list_name)? else {
        return Ok(None);
    };

    let report = file.apply(edit, import_line, entry);
    if report.changed() {
        file.save(path)?;
    }

    Ok(Some(report))
}
