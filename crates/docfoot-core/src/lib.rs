//! # docfoot core
//!
//! Types and pure logic for extracting `key: value` metadata from the footers
//! of `.docx` documents. Reading the documents and running batches lives in
//! the `docfoot-backend` crate; this crate holds everything that does not
//! need to open a document:
//!
//! - [`parse_key_values`]: the colon rule that turns footer text into pairs
//! - [`flatten_rows`]: the same rule applied cell by cell to footer tables
//! - [`resolve`]: folder scan or file-list validation ([`InputSource`])
//! - [`FileResult`]: the per-file record, metadata or error
//! - [`report`]: text report and JSON rendering
//!
//! ## Example
//!
//! ```rust
//! use docfoot_core::{flatten_rows, parse_key_values};
//!
//! let mut metadata = parse_key_values("Author: Jane\nVersion: 2.0");
//! metadata.extend(flatten_rows(&[vec!["Status: final", ""]]));
//!
//! assert_eq!(metadata["Author"], "Jane");
//! assert_eq!(metadata["Status"], "final");
//! ```

pub mod error;
pub mod footer;
pub mod parser;
pub mod report;
pub mod resolver;
pub mod table;
pub mod types;

pub use error::{DocfootError, Result};
pub use footer::{FooterSection, FooterTable};
pub use parser::parse_key_values;
pub use report::{render_report, save_report, to_json, write_report, DEFAULT_REPORT_FILE};
pub use resolver::{
    has_docx_extension, resolve, InputSource, ResolvedFileSet, SkipReason, SkippedEntry,
    DOCX_EXTENSION,
};
pub use table::flatten_rows;
pub use types::{
    file_name_of, summarize, BatchResult, Extraction, FileResult, MetadataMap, ERROR_KEY,
};
