//! # docfoot backend
//!
//! Reads `.docx` footers and runs concurrent extraction batches on top of
//! the pure logic in `docfoot-core`.
//!
//! - [`FooterBackend`]: document container exposing section footers
//! - [`DocxBackend`]: the ZIP + XML implementation for Word documents
//! - [`DocumentProcessor`]: one document to one [`FileResult`]
//! - [`BatchExtractor`]: many documents on a bounded worker pool
//!
//! ## Example
//!
//! ```rust,no_run
//! use docfoot_backend::{BatchExtractor, ExtractorConfig};
//! use docfoot_core::InputSource;
//!
//! let config = ExtractorConfig::default().with_max_workers(Some(4));
//! let extractor = BatchExtractor::with_config(config);
//! let results = extractor.extract(&InputSource::folder("contracts"), true)?;
//!
//! for result in &results {
//!     println!("{}: {} entries", result.filename(), result.metadata_view().len());
//! }
//! # Ok::<(), docfoot_core::DocfootError>(())
//! ```
//!
//! [`FileResult`]: docfoot_core::FileResult

pub mod docx;
pub mod extractor;
pub mod processor;
pub mod reporter;
pub mod traits;

pub use docx::DocxBackend;
pub use extractor::{BatchExtractor, ExtractorConfig};
pub use processor::{merge_sections, DocumentProcessor};
pub use reporter::ConsoleReporter;
pub use traits::FooterBackend;
