use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::functions::infer_function;
use super::lines::Line;
use crate::model::{Paragraph, ParagraphFunction, Section, SectionKind, SectionStatus};
use crate::settings::StructureOptions;

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

/// Hands out `p1`, `p2`, … across the whole document.
#[derive(Debug, Default)]
struct ParagraphIds(usize);

impl ParagraphIds {
    fn next(&mut self) -> String {
        self.0 += 1;
        format!("p{}", self.0)
    }
}

/// Group classified lines under the header that precedes them.
///
/// A section is sealed when the next header arrives or input ends, and only
/// if it collected at least one paragraph. Body lines before the first header
/// belong to no section and are dropped without consuming an id.
pub fn cluster_sections(lines: &[Line], opts: &StructureOptions) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current_kind: Option<SectionKind> = None;
    let mut current_paragraphs: Vec<Paragraph> = Vec::new();
    let mut ids = ParagraphIds::default();
    let mut preamble = 0usize;

    for line in lines {
        match line {
            Line::Header(kind) => {
                if let Some(open) = current_kind {
                    seal(&mut sections, open, std::mem::take(&mut current_paragraphs), opts);
                }
                current_kind = Some(*kind);
            }
            Line::Body(text) => match current_kind {
                Some(kind) => current_paragraphs.push(Paragraph {
                    id: ids.next(),
                    text: text.clone(),
                    function: infer_function(text, kind),
                }),
                None => preamble += 1,
            },
            Line::Noise(_) => {}
        }
    }

    if let Some(open) = current_kind {
        seal(&mut sections, open, current_paragraphs, opts);
    }

    if preamble > 0 {
        debug!(lines = preamble, "Dropped body lines before the first header");
    }

    sections
}

fn seal(
    sections: &mut Vec<Section>,
    kind: SectionKind,
    paragraphs: Vec<Paragraph>,
    opts: &StructureOptions,
) {
    if paragraphs.is_empty() {
        debug!(section = kind.id(), "Discarding header with no body");
        return;
    }
    debug!(section = kind.id(), paragraphs = paragraphs.len(), "Sealed section");
    sections.push(Section {
        id: kind.id().to_string(),
        title: kind.title(opts.locale).to_string(),
        kind,
        status: SectionStatus::Unread,
        paragraphs,
    });
}

/// Single catch-all section built from blank-line separated fragments.
/// `None` when no fragment is long enough to be a paragraph.
pub fn full_text_fallback(text: &str, opts: &StructureOptions) -> Option<Section> {
    let mut ids = ParagraphIds::default();
    let paragraphs: Vec<Paragraph> = BLANK_LINE_RE
        .split(text)
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > opts.min_paragraph_chars)
        .map(|fragment| Paragraph {
            id: ids.next(),
            text: fragment.to_string(),
            function: ParagraphFunction::General,
        })
        .collect();

    if paragraphs.is_empty() {
        return None;
    }

    let kind = SectionKind::General;
    Some(Section {
        id: kind.id().to_string(),
        title: kind.title(opts.locale).to_string(),
        kind,
        status: SectionStatus::Unread,
        paragraphs,
    })
}

// ── Tests ──
