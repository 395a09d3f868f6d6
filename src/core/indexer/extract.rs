//! Text extraction for uploaded documents.
//!
//! PDF, DOCX and HTML files are turned into plain text here; every
//! other accepted extension is read as UTF-8. The loader normalises
//! whitespace afterwards, so extractors keep paragraph breaks as
//! newlines and nothing more.

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::core::error::{AdvisorError, Result};

const UTF8_BOM: &str = "\u{feff}";

/// Main part of a WordprocessingML package
const DOCX_BODY: &str = "word/document.xml";

static HTML_HIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>").unwrap()
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

const HTML_ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// How a file's bytes become text, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Html,
    PlainText,
}

impl DocumentFormat {
    /// Format for `filename`; unknown extensions are plain text.
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            Some("html" | "htm") => Self::Html,
            _ => Self::PlainText,
        }
    }
}

/// Extract the raw text of `bytes` according to the file's format.
///
/// # Errors
///
/// `InvalidDocument` naming the file when the content cannot be read
/// as its format.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    match DocumentFormat::from_filename(filename) {
        DocumentFormat::Pdf => pdf_text(filename, bytes),
        DocumentFormat::Docx => docx_text(filename, bytes),
        DocumentFormat::Html => Ok(html_text(utf8(filename, bytes)?)),
        DocumentFormat::PlainText => Ok(utf8(filename, bytes)?.to_string()),
    }
}

fn utf8<'a>(filename: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let raw = std::str::from_utf8(bytes).map_err(|e| {
        AdvisorError::InvalidDocument(format!("{filename} is not valid UTF-8: {e}"))
    })?;
    Ok(raw.strip_prefix(UTF8_BOM).unwrap_or(raw))
}

/// Visible text of an HTML page: scripts, styles and comments dropped,
/// tags replaced by spaces, common entities decoded.
fn html_text(html: &str) -> String {
    let visible = HTML_HIDDEN.replace_all(html, " ");
    let mut text = HTML_TAG.replace_all(&visible, " ").into_owned();
    for (entity, replacement) in HTML_ENTITIES {
        text = text.replace(entity, replacement);
    }
    text
}

fn pdf_text(filename: &str, bytes: &[u8]) -> Result<String> {
    // The parser panics on some malformed files
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AdvisorError::InvalidDocument(format!(
            "Error reading PDF {filename}: {e}"
        ))),
        Err(_) => Err(AdvisorError::InvalidDocument(format!(
            "Error reading PDF {filename}: malformed document"
        ))),
    }
}

fn docx_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let invalid = |e: &dyn std::fmt::Display| {
        AdvisorError::InvalidDocument(format!("Error reading DOCX {filename}: {e}"))
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| invalid(&e))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| invalid(&e))?
        .read_to_string(&mut xml)
        .map_err(|e| invalid(&e))?;

    paragraphs_from_xml(&xml).map_err(|e| invalid(&e))
}

/// Text runs of a `word/document.xml` body, one line per paragraph.
fn paragraphs_from_xml(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run_text => text.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
