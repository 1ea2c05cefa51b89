use std::path::{Path, PathBuf};

use lopdf::content::Content;
use lopdf::Object;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },
    #[error("could not process PDF {path}: {source}")]
    Pdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("PDF {path} is encrypted and its text cannot be read")]
    Encrypted { path: PathBuf },
    #[error("no text found in {path}; scanned documents are not supported")]
    NoText { path: PathBuf },
}

/// Turns a file into the plain text the structurer works on.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8 {
            path: path.to_path_buf(),
        })
    }
}

/// One line per text row, pages separated by a blank line.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let doc = lopdf::Document::load(path).map_err(|source| ExtractError::Pdf {
            path: path.to_path_buf(),
            source,
        })?;
        if doc.is_encrypted() {
            return Err(ExtractError::Encrypted {
                path: path.to_path_buf(),
            });
        }

        let pages = doc.get_pages();
        debug!(path = %path.display(), pages = pages.len(), "Loaded PDF");

        let mut page_texts = Vec::with_capacity(pages.len());
        for (page_num, page_id) in &pages {
            match page_text(&doc, *page_id) {
                Ok(text) if !text.is_empty() => page_texts.push(text),
                Ok(_) => debug!(page = page_num, "Page has no text"),
                Err(e) => warn!(path = %path.display(), page = page_num, "Skipping page: {}", e),
            }
        }

        if page_texts.is_empty() {
            return Err(ExtractError::NoText {
                path: path.to_path_buf(),
            });
        }
        Ok(page_texts.join("\n\n"))
    }
}

// TJ adjustments are in thousandths of an em; a gap this wide is a word break.
const TJ_WORD_GAP: f32 = -200.0;

/// Walk the page's content stream. Shown strings are separated by spaces;
/// line moves (`Td`/`TD` with a vertical offset, `T*`, `'`, `"`) and the end
/// of a text object start a new line. Whitespace inside a line is collapsed.
fn page_text(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Result<String, lopdf::Error> {
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut raw = String::new();
    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" | "TJ" => {
                for operand in &op.operands {
                    push_shown(&mut raw, operand);
                }
                raw.push(' ');
            }
            "'" | "\"" => {
                raw.push('\n');
                // `"` takes word and char spacing before the string
                if let Some(operand) = op.operands.last() {
                    push_shown(&mut raw, operand);
                }
                raw.push(' ');
            }
            "Td" | "TD" => {
                let dy = op.operands.get(1).and_then(number).unwrap_or(0.0);
                raw.push(if dy != 0.0 { '\n' } else { ' ' });
            }
            "T*" | "ET" => raw.push('\n'),
            _ => {}
        }
    }

    Ok(raw
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn push_shown(out: &mut String, obj: &Object) {
    match obj {
        Object::String(bytes, _) => out.push_str(&decode_pdf_string(bytes)),
        Object::Array(items) => {
            for item in items {
                match item {
                    Object::String(bytes, _) => out.push_str(&decode_pdf_string(bytes)),
                    other => {
                        if number(other).is_some_and(|gap| gap < TJ_WORD_GAP) {
                            out.push(' ');
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// UTF-16BE when the string carries a BOM, Latin-1 otherwise.
fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Pick the extractor by file extension; anything but `.pdf` is read as text.
pub fn extractor_for(path: &Path) -> &'static dyn TextExtractor {
    if is_pdf(path) {
        &PdfExtractor
    } else {
        &PlainTextExtractor
    }
}

pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    extractor_for(path).extract(path)
}

/// Caller-facing title for a file: its name without the extension.
pub fn title_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
