//! DOCX footer backend
//!
//! A DOCX file is a ZIP archive of XML parts. Footers involve three of them:
//! - `word/document.xml`: body, ending each section with `w:sectPr`, which
//!   points at its footer via `w:footerReference r:id="..."`
//! - `word/_rels/document.xml.rels`: relationship id to part path
//! - `word/footerN.xml`: footer content under a `w:ftr` root
//!
//! Only the default footer of a section is read. Even-page and first-page
//! footers are ignored. A section without a default footer reference
//! inherits the footer of the previous section.

use crate::traits::FooterBackend;
use docfoot_core::{DocfootError, FooterSection, FooterTable};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const RELS_PART: &str = "word/_rels/document.xml.rels";

const W_SECT_PR: &[u8] = b"w:sectPr";
const W_SECT_PR_CHANGE: &[u8] = b"w:sectPrChange";
const W_FOOTER_REFERENCE: &[u8] = b"w:footerReference";
const W_P: &[u8] = b"w:p";
const W_R: &[u8] = b"w:r";
const W_T: &[u8] = b"w:t";
const W_TAB: &[u8] = b"w:tab";
const W_PTAB: &[u8] = b"w:ptab";
const W_BR: &[u8] = b"w:br";
const W_CR: &[u8] = b"w:cr";
const W_NO_BREAK_HYPHEN: &[u8] = b"w:noBreakHyphen";
const W_TBL: &[u8] = b"w:tbl";
const W_TR: &[u8] = b"w:tr";
const W_TC: &[u8] = b"w:tc";

/// Extract an attribute value by key
#[inline]
fn get_attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Reads section footers out of `.docx` archives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocxBackend;

impl DocxBackend {
    #[inline]
    #[must_use = "creates a DOCX backend"]
    pub const fn new() -> Self {
        Self
    }

    /// Read section footers from an in-memory or already opened archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is invalid, `word/document.xml` or a
    /// referenced footer part is missing, or an XML part is malformed.
    pub fn read_footers_from<R: Read + Seek>(
        &self,
        reader: R,
    ) -> Result<Vec<FooterSection>, DocfootError> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| DocfootError::BackendError(format!("Failed to open DOCX as ZIP: {e}")))?;
        Self::read_archive(&mut archive)
    }

    fn read_archive<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> Result<Vec<FooterSection>, DocfootError> {
        let document_xml = read_part(archive, DOCUMENT_PART)?
            .ok_or_else(|| DocfootError::MissingPart(DOCUMENT_PART.to_string()))?;
        let footer_refs = parse_section_footer_refs(&document_xml)?;
        if footer_refs.is_empty() {
            return Ok(Vec::new());
        }

        let relationships = match read_part(archive, RELS_PART)? {
            Some(xml) => parse_relationships(&xml)?,
            None => HashMap::new(),
        };

        // Several sections commonly share one footer part
        let mut parsed: HashMap<String, FooterSection> = HashMap::new();
        let mut sections = Vec::with_capacity(footer_refs.len());
        let mut current = FooterSection::new();

        for (index, footer_ref) in footer_refs.iter().enumerate() {
            if let Some(rel_id) = footer_ref {
                let target = relationships.get(rel_id).ok_or_else(|| {
                    DocfootError::BackendError(format!("Relationship {rel_id} not found"))
                })?;
                let footer = match parsed.entry(resolve_part_path(target)) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        let xml = read_part(archive, entry.key())?
                            .ok_or_else(|| DocfootError::MissingPart(entry.key().clone()))?;
                        let footer = parse_footer_xml(&xml)?;
                        entry.insert(footer)
                    }
                };
                current = footer.clone();
            }

            debug!(
                "Section {index}: {} footer paragraphs, {} footer tables",
                current.paragraphs.len(),
                current.tables.len()
            );
            sections.push(current.clone());
        }

        Ok(sections)
    }
}

impl FooterBackend for DocxBackend {
    fn read_footers(&self, path: &Path) -> Result<Vec<FooterSection>, DocfootError> {
        let file = File::open(path)?;
        self.read_footers_from(BufReader::new(file))
    }

    fn name(&self) -> &'static str {
        "DOCX"
    }
}

/// Read an archive member as UTF-8, `None` when the member does not exist
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, DocfootError> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(DocfootError::BackendError(format!(
                "Failed to read {name}: {e}"
            )))
        }
    };

    let mut content = String::new();
    part.read_to_string(&mut content).map_err(DocfootError::IoError)?;
    Ok(Some(content))
}

/// Map a relationship target to an archive member name.
///
/// Targets are relative to `word/` unless they start with `/`.
fn resolve_part_path(target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{target}"),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, DocfootError> {
    let mut relationships = HashMap::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e)) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (get_attr(&e, b"Id"), get_attr(&e, b"Target")) {
                    relationships.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocfootError::BackendError(format!(
                    "Error parsing relationships: {e}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// One entry per section in document order: the relationship id of its
/// default footer, or `None` when the section links to the previous one.
///
/// Section properties recorded inside `w:sectPrChange` (tracked revisions)
/// describe a former state and are skipped.
fn parse_section_footer_refs(xml: &str) -> Result<Vec<Option<String>>, DocfootError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut refs = Vec::new();
    let mut current: Option<Option<String>> = None;
    let mut change_depth = 0usize;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                W_SECT_PR_CHANGE => change_depth += 1,
                W_SECT_PR if change_depth == 0 => current = Some(None),
                W_FOOTER_REFERENCE if change_depth == 0 => record_footer_ref(&e, &mut current),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                W_SECT_PR if change_depth == 0 => refs.push(None),
                W_FOOTER_REFERENCE if change_depth == 0 => record_footer_ref(&e, &mut current),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                W_SECT_PR_CHANGE => change_depth = change_depth.saturating_sub(1),
                W_SECT_PR if change_depth == 0 => {
                    if let Some(footer) = current.take() {
                        refs.push(footer);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocfootError::BackendError(format!(
                    "Error parsing document.xml: {e}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(refs)
}

fn record_footer_ref(e: &BytesStart<'_>, current: &mut Option<Option<String>>) {
    let Some(footer) = current.as_mut() else {
        return;
    };
    let kind = get_attr(e, b"w:type");
    if matches!(kind.as_deref(), None | Some("default")) {
        if let Some(id) = get_attr(e, b"r:id") {
            *footer = Some(id);
        }
    }
}

/// Parse a footer part (`w:ftr`) into its top-level paragraphs and tables.
///
/// Paragraph text is the text of its runs: `w:t` content, `w:tab` and
/// `w:ptab` as `\t`, `w:noBreakHyphen` as `-`, and `w:cr` or a text-wrapping
/// `w:br` as `\n`. Page and column breaks add nothing.
///
/// Cell text is the cell's own paragraphs joined with `\n`. Paragraphs of
/// nested tables and of text boxes inside a paragraph are not part of the
/// enclosing text.
fn parse_footer_xml(xml: &str) -> Result<FooterSection, DocfootError> {
    let mut reader = Reader::from_str(xml);
    // Runs carry significant spaces via xml:space="preserve"
    reader.trim_text(false);

    let mut state = FooterWalkState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => state.handle_start_element(e.name().as_ref()),
            Ok(Event::Empty(e)) => state.handle_empty_element(&e),
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| {
                    DocfootError::BackendError(format!("Error parsing footer: {e}"))
                })?;
                state.handle_text_event(&text);
            }
            Ok(Event::End(_)) => state.handle_end_element(),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocfootError::BackendError(format!(
                    "Error parsing footer: {e}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(state.section)
}

#[derive(Debug, Default)]
struct FooterWalkState {
    /// Open elements, root first
    stack: Vec<Vec<u8>>,
    section: FooterSection,
    /// Text of the paragraph being collected, if it is a top-level or cell paragraph
    paragraph: Option<String>,
    /// Paragraphs open inside the collected one (text boxes)
    nested_paragraphs: usize,
    cell_paragraphs: Vec<String>,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FooterWalkState {
    /// Whether the open elements below the root are exactly `path`
    fn at(&self, path: &[&[u8]]) -> bool {
        self.stack.len() == path.len() + 1
            && self.stack[1..]
                .iter()
                .zip(path)
                .all(|(open, expected)| open.as_slice() == *expected)
    }

    fn in_footer_body(&self) -> bool {
        self.at(&[])
    }

    fn in_table_cell(&self) -> bool {
        self.at(&[W_TBL, W_TR, W_TC])
    }

    fn handle_start_element(&mut self, name: &[u8]) {
        match name {
            W_P if self.paragraph.is_some() => self.nested_paragraphs += 1,
            W_P if self.in_footer_body() || self.in_table_cell() => {
                self.paragraph = Some(String::new());
            }
            _ => {}
        }
        self.stack.push(name.to_vec());
    }

    /// Whether the innermost open element is a run
    fn in_run(&self) -> bool {
        self.stack.last().is_some_and(|open| open.as_slice() == W_R)
    }

    fn handle_empty_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            W_TAB | W_PTAB if self.in_run() => self.push_text("\t"),
            W_NO_BREAK_HYPHEN if self.in_run() => self.push_text("-"),
            W_CR if self.in_run() => self.push_text("\n"),
            W_BR if self.in_run() => {
                let kind = get_attr(e, b"w:type");
                if matches!(kind.as_deref(), None | Some("textWrapping")) {
                    self.push_text("\n");
                }
            }
            W_P if self.paragraph.is_none() => {
                if self.in_footer_body() {
                    self.section.paragraphs.push(String::new());
                } else if self.in_table_cell() {
                    self.cell_paragraphs.push(String::new());
                }
            }
            W_TC if self.at(&[W_TBL, W_TR]) => self.row.push(String::new()),
            W_TR if self.at(&[W_TBL]) => self.rows.push(Vec::new()),
            W_TBL if self.in_footer_body() => self.section.tables.push(FooterTable::default()),
            _ => {}
        }
    }

    fn handle_text_event(&mut self, text: &str) {
        if self.stack.last().is_some_and(|open| open.as_slice() == W_T) {
            self.push_text(text);
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.nested_paragraphs > 0 {
            return;
        }
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_str(text);
        }
    }

    fn handle_end_element(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };

        match name.as_slice() {
            W_P if self.nested_paragraphs > 0 => self.nested_paragraphs -= 1,
            W_P => {
                if let Some(text) = self.paragraph.take() {
                    if self.in_footer_body() {
                        self.section.paragraphs.push(text);
                    } else {
                        self.cell_paragraphs.push(text);
                    }
                }
            }
            W_TC if self.at(&[W_TBL, W_TR]) => {
                let text = std::mem::take(&mut self.cell_paragraphs).join("\n");
                self.row.push(text);
            }
            W_TR if self.at(&[W_TBL]) => {
                let row = std::mem::take(&mut self.row);
                self.rows.push(row);
            }
            W_TBL if self.in_footer_body() => {
                let rows = std::mem::take(&mut self.rows);
                self.section.tables.push(FooterTable::new(rows));
            }
            _ => {}
        }
    }
}
