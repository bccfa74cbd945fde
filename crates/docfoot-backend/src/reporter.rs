//! Human-readable progress output for batch runs
//!
//! Every message is written with a single `write_all` while holding the
//! sink lock, so lines of concurrently finishing files never interleave,
//! and other writers to the same stream (log output) land between blocks.

use docfoot_core::{Extraction, FileResult, ResolvedFileSet, SkippedEntry};
use log::debug;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Line-oriented progress sink shared by all workers of a batch
pub struct ConsoleReporter {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Reporter that discards everything
    #[must_use]
    pub fn silent() -> Self {
        Self::new(io::sink())
    }

    /// `Found N .docx files to process:` followed by one line per file
    pub fn files_found(&self, files: &ResolvedFileSet) {
        let mut lines = Vec::with_capacity(files.len() + 1);
        lines.push(format!("Found {} .docx files to process:", files.len()));
        lines.extend(files.file_names().iter().map(|name| format!("  - {name}")));
        self.emit(&lines);
    }

    /// One `Warning: <reason>: <path>` line per skipped entry
    pub fn skipped(&self, entries: &[SkippedEntry]) {
        let lines: Vec<String> = entries.iter().map(|entry| format!("Warning: {entry}")).collect();
        self.emit(&lines);
    }

    /// `Processed: <name>` and a status line
    pub fn file_processed(&self, result: &FileResult) {
        let status = match result.extraction() {
            Extraction::Failed(message) => format!("  Error: {message}"),
            Extraction::Metadata(metadata) if metadata.is_empty() => {
                "  No metadata found".to_string()
            }
            Extraction::Metadata(metadata) => {
                format!("  Found {} metadata entries", metadata.len())
            }
        };
        self.emit(&[format!("Processed: {}", result.filename()), status]);
    }

    /// A task that failed outside normal document processing
    pub fn task_failed(&self, filename: &str, message: &str) {
        self.emit(&[format!("Error processing {filename}: {message}")]);
    }

    fn emit(&self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let block: String = lines.iter().map(|line| format!("{line}\n")).collect();

        // A poisoned lock only means another writer panicked mid-block
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let written = sink.write_all(block.as_bytes()).and_then(|()| sink.flush());
        if let Err(e) = written {
            debug!("Failed to write progress output: {e}");
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfoot_core::{MetadataMap, SkipReason};
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Records every `write` call separately
    #[derive(Clone, Default)]
    struct WriteLog(Arc<Mutex<Vec<String>>>);

    impl Write for WriteLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let chunk = String::from_utf8_lossy(buf).into_owned();
            self.0.lock().unwrap().push(chunk);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn reporter() -> (ConsoleReporter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (ConsoleReporter::new(buffer.clone()), buffer)
    }

    #[test]
    fn test_file_processed_status_lines() {
        let (reporter, buffer) = reporter();
        let mut metadata = MetadataMap::new();
        metadata.insert("Author".to_string(), "Jane".to_string());

        reporter.file_processed(&FileResult::success("a.docx", metadata));
        reporter.file_processed(&FileResult::success("b.docx", MetadataMap::new()));
        reporter.file_processed(&FileResult::failure("c.docx", "bad zip"));

        assert_eq!(
            buffer.contents(),
            "Processed: a.docx\n  Found 1 metadata entries\n\
             Processed: b.docx\n  No metadata found\n\
             Processed: c.docx\n  Error: bad zip\n"
        );
    }

    #[test]
    fn test_skipped_warnings() {
        let (reporter, buffer) = reporter();
        reporter.skipped(&[
            SkippedEntry {
                path: PathBuf::from("/tmp/missing.docx"),
                reason: SkipReason::NotFound,
            },
            SkippedEntry {
                path: PathBuf::from("notes.txt"),
                reason: SkipReason::WrongExtension,
            },
        ]);

        assert_eq!(
            buffer.contents(),
            "Warning: File not found: /tmp/missing.docx\nWarning: Not a .docx file: notes.txt\n"
        );
    }

    #[test]
    fn test_task_failed() {
        let (reporter, buffer) = reporter();
        reporter.task_failed("a.docx", "worker crashed");
        assert_eq!(buffer.contents(), "Error processing a.docx: worker crashed\n");
    }

    #[test]
    fn test_block_is_a_single_write() {
        let log = WriteLog::default();
        let reporter = ConsoleReporter::new(log.clone());

        reporter.file_processed(&FileResult::failure("c.docx", "bad zip"));
        reporter.skipped(&[
            SkippedEntry {
                path: PathBuf::from("a.txt"),
                reason: SkipReason::WrongExtension,
            },
            SkippedEntry {
                path: PathBuf::from("b.txt"),
                reason: SkipReason::WrongExtension,
            },
        ]);

        assert_eq!(
            *log.0.lock().unwrap(),
            vec![
                "Processed: c.docx\n  Error: bad zip\n".to_string(),
                "Warning: Not a .docx file: a.txt\nWarning: Not a .docx file: b.txt\n".to_string(),
            ]
        );
    }

    #[test]
    fn test_silent_reporter() {
        let reporter = ConsoleReporter::silent();
        reporter.task_failed("a.docx", "ignored");
        reporter.skipped(&[]);
    }
}
