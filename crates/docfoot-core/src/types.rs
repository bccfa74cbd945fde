//! Result records produced by footer extraction

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;

/// Key/value pairs found in one document's footers.
///
/// Keys are unique; when a key repeats, the occurrence seen last wins.
pub type MetadataMap = HashMap<String, String>;

/// One record per processed path. Order is completion order, not input order.
pub type BatchResult = Vec<FileResult>;

/// Key used by the flattened view of a failed extraction
pub const ERROR_KEY: &str = "error";

/// Outcome of reading one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Footers were read; the map may be empty
    Metadata(MetadataMap),
    /// The document could not be read
    Failed(String),
}

/// Extraction record for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    filename: String,
    extraction: Extraction,
}

impl FileResult {
    /// Record a successful extraction
    #[inline]
    #[must_use = "creates a result record"]
    pub fn success(filename: impl Into<String>, metadata: MetadataMap) -> Self {
        Self {
            filename: filename.into(),
            extraction: Extraction::Metadata(metadata),
        }
    }

    /// Record a failed extraction
    #[inline]
    #[must_use = "creates a result record"]
    pub fn failure(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            extraction: Extraction::Failed(message.into()),
        }
    }

    /// Base name of the source file
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[inline]
    #[must_use]
    pub const fn extraction(&self) -> &Extraction {
        &self.extraction
    }

    /// Extracted metadata, `None` if the extraction failed
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> Option<&MetadataMap> {
        match &self.extraction {
            Extraction::Metadata(map) => Some(map),
            Extraction::Failed(_) => None,
        }
    }

    /// Failure description, `None` if the extraction succeeded
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.extraction {
            Extraction::Metadata(_) => None,
            Extraction::Failed(message) => Some(message.as_str()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.extraction, Extraction::Failed(_))
    }

    /// Metadata as a flat map, with a failure collapsed to `{"error": message}`.
    #[must_use = "builds a new map"]
    pub fn metadata_view(&self) -> MetadataMap {
        match &self.extraction {
            Extraction::Metadata(map) => map.clone(),
            Extraction::Failed(message) => {
                HashMap::from([(ERROR_KEY.to_string(), message.clone())])
            }
        }
    }

    /// Flattened view as `(key, value)` pairs sorted by key.
    #[must_use = "builds a sorted list of entries"]
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        match &self.extraction {
            Extraction::Metadata(map) => {
                let mut entries: Vec<(&str, &str)> = map
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                entries.sort_unstable();
                entries
            }
            Extraction::Failed(message) => vec![(ERROR_KEY, message.as_str())],
        }
    }
}

/// Serializes as `{"filename": ..., "metadata": {...}}` with keys sorted.
impl Serialize for FileResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct SortedMetadata<'a>(Vec<(&'a str, &'a str)>);

        impl Serialize for SortedMetadata<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (key, value) in &self.0 {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }

        let mut record = serializer.serialize_struct("FileResult", 2)?;
        record.serialize_field("filename", &self.filename)?;
        record.serialize_field("metadata", &SortedMetadata(self.sorted_entries()))?;
        record.end()
    }
}

/// Derive the reported filename from a source path.
///
/// Uses the final path component; paths without one (`/`, `..`) fall back to
/// the full path text so the name is never empty.
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| path.display().to_string())
}

/// Count results by outcome: (with metadata, empty, failed)
#[must_use]
pub fn summarize(results: &[FileResult]) -> (usize, usize, usize) {
    results
        .iter()
        .fold((0, 0, 0), |(found, empty, failed), result| {
            match result.extraction() {
                Extraction::Failed(_) => (found, empty, failed + 1),
                Extraction::Metadata(map) if map.is_empty() => (found, empty + 1, failed),
                Extraction::Metadata(_) => (found + 1, empty, failed),
            }
        })
}
