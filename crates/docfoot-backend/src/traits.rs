//! Core trait definitions for footer backends

use docfoot_core::{DocfootError, FooterSection};
use std::path::Path;

/// A document container that can expose its section footers.
///
/// Implementations are shared by every worker thread of a batch, hence the
/// `Send + Sync` bound.
pub trait FooterBackend: Send + Sync {
    /// Read the footer of every section of the document at `path`, in
    /// document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be opened or is malformed.
    fn read_footers(&self, path: &Path) -> Result<Vec<FooterSection>, DocfootError>;

    /// Short name used in log messages
    fn name(&self) -> &'static str;
}

