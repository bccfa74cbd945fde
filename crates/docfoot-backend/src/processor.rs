//! Per-document metadata extraction

use crate::docx::DocxBackend;
use crate::traits::FooterBackend;
use docfoot_core::{
    file_name_of, flatten_rows, parse_key_values, FileResult, FooterSection, MetadataMap, Result,
};
use log::debug;
use std::path::Path;

/// Merge the metadata of every section footer, in document order.
///
/// Within a section, non-blank paragraphs come first, then tables. A key seen
/// again later overwrites the earlier value.
#[must_use = "returns the merged metadata"]
pub fn merge_sections(sections: &[FooterSection]) -> MetadataMap {
    let mut metadata = MetadataMap::new();

    for section in sections {
        for paragraph in &section.paragraphs {
            let text = paragraph.trim();
            if !text.is_empty() {
                metadata.extend(parse_key_values(text));
            }
        }
        for table in &section.tables {
            metadata.extend(flatten_rows(&table.rows));
        }
    }

    metadata
}

/// Turns one document into a [`FileResult`]
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor<B = DocxBackend> {
    backend: B,
}

impl<B: FooterBackend> DocumentProcessor<B> {
    #[inline]
    #[must_use = "creates a document processor"]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    #[inline]
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Footer metadata of the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the document cannot be read.
    pub fn extract_metadata(&self, path: &Path) -> Result<MetadataMap> {
        let sections = self.backend.read_footers(path)?;
        Ok(merge_sections(&sections))
    }

    /// Process one document. Never fails: a read error becomes an error
    /// result carrying the error message.
    #[must_use = "returns the result for this document"]
    pub fn process(&self, path: &Path) -> FileResult {
        let filename = file_name_of(path);

        match self.extract_metadata(path) {
            Ok(metadata) => {
                debug!("{filename}: {} metadata entries", metadata.len());
                FileResult::success(filename, metadata)
            }
            Err(e) => {
                debug!("{filename}: {e}");
                FileResult::failure(filename, e.to_string())
            }
        }
    }
}
