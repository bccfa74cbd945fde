//! Concurrent batch extraction
//!
//! Inputs are resolved to a file set first (see [`docfoot_core::resolve`]),
//! then every file is processed on a bounded rayon pool. Results come back
//! in completion order, one per resolved file, whatever happens inside a
//! task.

use crate::docx::DocxBackend;
use crate::processor::DocumentProcessor;
use crate::reporter::ConsoleReporter;
use crate::traits::FooterBackend;
use docfoot_core::{
    file_name_of, resolve, BatchResult, DocfootError, FileResult, InputSource, ResolvedFileSet,
    Result,
};
use log::{debug, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc;

/// Batch settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExtractorConfig {
    /// Worker threads; `None` or `Some(0)` uses the rayon default
    /// (`RAYON_NUM_THREADS`, else the number of logical CPUs)
    pub max_workers: Option<usize>,
}

impl ExtractorConfig {
    #[inline]
    #[must_use = "returns the updated config"]
    pub const fn with_max_workers(mut self, max_workers: Option<usize>) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Thread count handed to the pool builder for `file_count` files,
    /// where 0 means default. Never more threads than files.
    #[inline]
    #[must_use]
    pub fn pool_threads(&self, file_count: usize) -> usize {
        match self.max_workers {
            Some(n) if n > 0 => n.min(file_count.max(1)),
            _ => 0,
        }
    }
}

/// Extracts footer metadata from many documents concurrently
#[derive(Debug)]
pub struct BatchExtractor<B = DocxBackend> {
    processor: DocumentProcessor<B>,
    config: ExtractorConfig,
    reporter: ConsoleReporter,
}

impl BatchExtractor<DocxBackend> {
    #[must_use = "creates a batch extractor"]
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    #[must_use = "creates a batch extractor"]
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self::with_backend(DocxBackend::new(), config)
    }
}

impl Default for BatchExtractor<DocxBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: FooterBackend> BatchExtractor<B> {
    #[must_use = "creates a batch extractor"]
    pub fn with_backend(backend: B, config: ExtractorConfig) -> Self {
        Self {
            processor: DocumentProcessor::new(backend),
            config,
            reporter: ConsoleReporter::default(),
        }
    }

    /// Replace the progress sink (stdout by default)
    #[must_use = "returns the extractor with the new reporter"]
    pub fn with_reporter(mut self, reporter: ConsoleReporter) -> Self {
        self.reporter = reporter;
        self
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Resolve `source` and extract footer metadata from every resolved file.
    ///
    /// Skipped list entries are always reported. With `verbose`, the file list
    /// and a line per processed file are reported as well.
    ///
    /// # Errors
    ///
    /// Returns the resolution error if the input yields no files, or
    /// [`DocfootError::ThreadPool`] if the worker pool cannot start. Failures
    /// of individual files are part of the returned results instead.
    pub fn extract(&self, source: &InputSource, verbose: bool) -> Result<BatchResult> {
        let files = resolve(source)?;

        self.reporter.skipped(files.skipped());
        if verbose {
            self.reporter.files_found(&files);
        }

        self.extract_resolved(&files, verbose)
    }

    /// Extract footer metadata from an already resolved file set.
    ///
    /// # Errors
    ///
    /// Returns [`DocfootError::ThreadPool`] if the worker pool cannot start.
    pub fn extract_resolved(&self, files: &ResolvedFileSet, verbose: bool) -> Result<BatchResult> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.pool_threads(files.len()))
            .thread_name(|index| format!("docfoot-worker-{index}"))
            .build()
            .map_err(|e| DocfootError::ThreadPool(e.to_string()))?;

        info!(
            "Extracting footers from {} files on {} workers ({} backend)",
            files.len(),
            pool.current_num_threads(),
            self.processor.backend().name()
        );

        let (tx, rx) = mpsc::channel();
        pool.scope(move |scope| {
            for path in files.files() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = self.run_task(path, verbose);
                    // The receiver outlives the scope
                    let _ = tx.send(result);
                });
            }
        });

        let results: BatchResult = rx.into_iter().collect();
        info!("Extraction finished: {} results", results.len());
        Ok(results)
    }

    /// Process one file, turning a panic into an error result
    fn run_task(&self, path: &Path, verbose: bool) -> FileResult {
        debug!("Processing {}", path.display());
        match panic::catch_unwind(AssertUnwindSafe(|| self.processor.process(path))) {
            Ok(result) => {
                if verbose {
                    self.reporter.file_processed(&result);
                }
                result
            }
            Err(payload) => {
                let filename = file_name_of(path);
                let message = panic_message(payload.as_ref());
                warn!("Worker panicked while processing {filename}: {message}");
                if verbose {
                    self.reporter.task_failed(&filename, &message);
                }
                FileResult::failure(filename, message)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
