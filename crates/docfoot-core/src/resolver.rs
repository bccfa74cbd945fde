//! Input resolution: turn a folder or a file list into the documents to process.

use crate::error::{DocfootError, Result};
use log::{debug, warn};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix of the documents this crate reads
pub const DOCX_EXTENSION: &str = ".docx";

/// Whether the file name of `path` ends in `.docx` (case-sensitive).
/// A file named just `.docx` counts.
#[inline]
#[must_use]
pub fn has_docx_extension(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(DOCX_EXTENSION))
}

/// Where the documents of a batch come from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Every `.docx` directly inside this directory
    Folder(PathBuf),
    /// An explicit list; invalid entries are skipped with a warning
    Files(Vec<PathBuf>),
}

impl InputSource {
    #[inline]
    #[must_use = "creates an input source"]
    pub fn folder(path: impl Into<PathBuf>) -> Self {
        Self::Folder(path.into())
    }

    #[must_use = "creates an input source"]
    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::Files(paths.into_iter().map(Into::into).collect())
    }
}

/// A JSON string is a folder, a JSON array of strings is a file list.
impl TryFrom<Value> for InputSource {
    type Error = DocfootError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(folder) => Ok(Self::Folder(PathBuf::from(folder))),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(path) => Ok(PathBuf::from(path)),
                    other => Err(DocfootError::InvalidInputType(format!(
                        "list containing {}",
                        json_type_name(&other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Files),
            other => Err(DocfootError::InvalidInputType(
                json_type_name(&other).to_string(),
            )),
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Why a list entry was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Nothing exists at the path
    NotFound,
    /// The path does not end in `.docx`
    WrongExtension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "File not found",
            Self::WrongExtension => "Not a .docx file",
        };
        write!(f, "{s}")
    }
}

/// A list entry excluded from the resolved set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.path.display())
    }
}

/// Validated documents for one batch.
///
/// Every path existed and had the `.docx` extension when it was resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFileSet {
    files: Vec<PathBuf>,
    skipped: Vec<SkippedEntry>,
}

impl ResolvedFileSet {
    /// Paths to process, in resolution order
    #[inline]
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// List entries that were skipped, in input order
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Base names of the files to process
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|path| crate::types::file_name_of(path))
            .collect()
    }
}

impl IntoIterator for ResolvedFileSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// Resolve `source` into the set of documents to process.
///
/// # Errors
///
/// For a folder: [`DocfootError::NotFound`] if it does not exist,
/// [`DocfootError::NotADirectory`] if it is not a directory,
/// [`DocfootError::NoDocuments`] if it holds no `.docx` file, or an I/O error
/// if it cannot be listed.
///
/// For a file list: [`DocfootError::EmptyFileList`] if the list is empty and
/// [`DocfootError::NoValidFiles`] if every entry was skipped. Entries that do
/// not exist or lack the `.docx` extension are skipped, not errors.
pub fn resolve(source: &InputSource) -> Result<ResolvedFileSet> {
    match source {
        InputSource::Folder(folder) => resolve_folder(folder),
        InputSource::Files(paths) => resolve_files(paths),
    }
}

fn resolve_folder(folder: &Path) -> Result<ResolvedFileSet> {
    if !folder.exists() {
        return Err(DocfootError::NotFound(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(DocfootError::NotADirectory(folder.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let name = entry.file_name();
        if has_docx_extension(Path::new(&name)) {
            files.push(folder.join(name));
        }
    }

    if files.is_empty() {
        return Err(DocfootError::NoDocuments(folder.to_path_buf()));
    }

    files.sort();
    debug!(
        "Resolved {} .docx files in {}",
        files.len(),
        folder.display()
    );

    Ok(ResolvedFileSet {
        files,
        skipped: Vec::new(),
    })
}

fn resolve_files(paths: &[PathBuf]) -> Result<ResolvedFileSet> {
    if paths.is_empty() {
        return Err(DocfootError::EmptyFileList);
    }

    let mut resolved = ResolvedFileSet::default();
    for path in paths {
        let reason = if !path.exists() {
            Some(SkipReason::NotFound)
        } else if !has_docx_extension(path) {
            Some(SkipReason::WrongExtension)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                let skipped = SkippedEntry {
                    path: path.clone(),
                    reason,
                };
                warn!("{skipped}");
                resolved.skipped.push(skipped);
            }
            None => resolved.files.push(path.clone()),
        }
    }

    if resolved.files.is_empty() {
        return Err(DocfootError::NoValidFiles);
    }

    Ok(resolved)
}
