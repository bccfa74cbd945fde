//! Rendering of batch results as a flat text report or JSON

use crate::error::Result;
use crate::types::FileResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Report file name used when none is given
pub const DEFAULT_REPORT_FILE: &str = "metadata_results.txt";

const REPORT_TITLE: &str = "DOCX Footer Metadata Extraction Results";
const BANNER_WIDTH: usize = 50;
const SEPARATOR_WIDTH: usize = 30;

/// Write the text report for `results` to `writer`.
///
/// Layout: a title and `=` banner, then for every file a `File: <name>` line,
/// a `-` separator, one `key: value` line per entry (keys sorted) or
/// `No metadata found`, and a blank line. A failed file renders its message as
/// an `error: <message>` entry.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_report<W: Write>(results: &[FileResult], mut writer: W) -> Result<()> {
    writeln!(writer, "{REPORT_TITLE}")?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer)?;

    for result in results {
        writeln!(writer, "File: {}", result.filename())?;
        writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;

        let entries = result.sorted_entries();
        if entries.is_empty() {
            writeln!(writer, "No metadata found")?;
        } else {
            for (key, value) in entries {
                writeln!(writer, "{key}: {value}")?;
            }
        }

        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render the text report into a string
#[must_use = "returns the rendered report"]
pub fn render_report(results: &[FileResult]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = write_report(results, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Create (or truncate) `path` and write the text report into it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_report<P: AsRef<Path>>(results: &[FileResult], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_report(results, BufWriter::new(file))
}

/// Serialize `results` as a JSON array of `{"filename", "metadata"}` records.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(results: &[FileResult], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    Ok(json)
}
