//! Integration tests for the docfoot binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write a single-section .docx whose default footer holds `paragraphs`
fn write_docx(path: &Path, paragraphs: &[&str]) {
    let footer_body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
        .collect();
    let footer = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:ftr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{footer_body}</w:ftr>"#
    );
    let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body><w:p><w:r><w:t>Body</w:t></w:r></w:p><w:sectPr><w:footerReference w:type="default" r:id="rId1"/></w:sectPr></w:body></w:document>"#;
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/></Relationships>"#;

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, content) in [
        ("word/document.xml", document),
        ("word/_rels/document.xml.rels", rels),
        ("word/footer1.xml", footer.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Workspace with a `docs/` folder holding one tagged document
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    write_docx(&docs.join("a.docx"), &["Author: Jane", "Version: 2.0"]);
    dir
}

/// docfoot isolated from the caller's config files and log settings
fn docfoot(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docfoot"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    docfoot(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract key/value metadata"));
}

#[test]
fn test_extract_folder_text_report() {
    let dir = workspace();
    docfoot(&dir)
        .args(["extract", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "DOCX Footer Metadata Extraction Results\n",
        ))
        .stdout(predicate::str::contains(
            "File: a.docx\n------------------------------\nAuthor: Jane\nVersion: 2.0\n",
        ));
}

#[test]
fn test_extract_json_output() {
    let dir = workspace();
    let output = docfoot(&dir)
        .args(["extract", "docs", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"filename": "a.docx", "metadata": {"Author": "Jane", "Version": "2.0"}}
        ])
    );
}

#[test]
fn test_extract_to_file() {
    let dir = workspace();
    docfoot(&dir)
        .args(["extract", "docs", "-o", "metadata_results.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Results saved to: metadata_results.txt",
        ));

    let report = fs::read_to_string(dir.path().join("metadata_results.txt")).unwrap();
    assert!(report.contains("File: a.docx\n"));
    assert!(report.contains("Author: Jane\n"));
}

#[test]
fn test_extract_file_list_with_skipped_entries() {
    let dir = workspace();
    fs::write(dir.path().join("notes.txt"), "Author: nobody").unwrap();

    docfoot(&dir)
        .args(["extract", "docs/a.docx", "missing.docx", "notes.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: File not found: missing.docx"))
        .stderr(predicate::str::contains("Warning: Not a .docx file: notes.txt"))
        .stdout(predicate::str::contains("File: a.docx"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn test_extract_corrupt_document_keeps_exit_code() {
    let dir = workspace();
    fs::write(dir.path().join("docs").join("bad.docx"), "not a zip").unwrap();

    docfoot(&dir)
        .args(["extract", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: bad.docx"))
        .stdout(predicate::str::contains(
            "error: Backend error: Failed to open DOCX as ZIP",
        ))
        .stdout(predicate::str::contains("Author: Jane"));
}

#[test]
fn test_extract_missing_folder() {
    let dir = TempDir::new().unwrap();
    docfoot(&dir)
        .args(["extract", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Folder not found: nowhere"));
}

#[test]
fn test_extract_folder_without_documents() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();

    docfoot(&dir)
        .args(["extract", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .docx files found in folder: empty"));
}

#[test]
fn test_extract_list_without_valid_files() {
    let dir = TempDir::new().unwrap();
    docfoot(&dir)
        .args(["extract", "a.docx", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No valid .docx files found in the provided list",
        ));
}

#[test]
fn test_manifest_array() {
    let dir = workspace();
    fs::write(
        dir.path().join("inputs.json"),
        r#"["docs/a.docx", "gone.docx"]"#,
    )
    .unwrap();

    docfoot(&dir)
        .args(["extract", "--manifest", "inputs.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: File not found: gone.docx"))
        .stdout(predicate::str::contains("Version: 2.0"));
}

#[test]
fn test_manifest_folder_string() {
    let dir = workspace();
    fs::write(dir.path().join("inputs.json"), r#""docs""#).unwrap();

    docfoot(&dir)
        .args(["extract", "--manifest", "inputs.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: a.docx"));
}

#[test]
fn test_manifest_invalid_shape() {
    let dir = workspace();
    fs::write(dir.path().join("inputs.json"), r#"{"folder": "docs"}"#).unwrap();

    docfoot(&dir)
        .args(["extract", "--manifest", "inputs.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Input must be either a folder path (string) or list of file paths, got object",
        ));
}

#[test]
fn test_verbose_progress_on_stderr() {
    let dir = workspace();
    docfoot(&dir)
        .args(["-v", "extract", "docs", "-j", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Found 1 .docx files to process:\n  - a.docx\n",
        ))
        .stderr(predicate::str::contains(
            "Processed: a.docx\n  Found 2 metadata entries\n",
        ));
}

#[test]
fn test_quiet_suppresses_stderr() {
    let dir = workspace();
    docfoot(&dir)
        .args(["-q", "extract", "docs"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("File: a.docx"));
}

#[test]
fn test_project_config_sets_defaults() {
    let dir = workspace();
    fs::write(
        dir.path().join(".docfoot.toml"),
        "[extract]\nformat = \"json\"\nworkers = 2\n",
    )
    .unwrap();

    let output = docfoot(&dir).args(["extract", "docs"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["metadata"]["Author"], "Jane");

    // Command-line flags win over the config file
    docfoot(&dir)
        .args(["extract", "docs", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "DOCX Footer Metadata Extraction Results",
        ));
}

#[test]
fn test_config_show() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".docfoot.toml"), "[extract]\nworkers = 6\n").unwrap();

    docfoot(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[extract]"))
        .stdout(predicate::str::contains("workers = 6"));

    let output = docfoot(&dir)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["extract"]["workers"], 6);
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    docfoot(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".docfoot.toml"))
        .stdout(predicate::str::contains("not found"));
}
