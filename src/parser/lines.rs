use std::sync::LazyLock;

use regex::Regex;

use crate::model::SectionKind;
use crate::settings::{HeaderMode, StructureOptions};

/// Section keywords, pt and en, in match priority order.
const HEADER_KEYWORDS: &[(SectionKind, &str)] = &[
    (SectionKind::Abstract, r"abstract|resumo"),
    (SectionKind::Introduction, r"introdu[çc][ãa]o|introduction"),
    (SectionKind::Methods, r"m[ée]todos?|methods?|metodologia"),
    (SectionKind::Results, r"resultados?|results?"),
    (SectionKind::Discussion, r"discuss[ãa]o|discussion"),
    (SectionKind::Conclusion, r"conclus[ãa]o|conclusion"),
    (SectionKind::References, r"refer[êe]ncias|references"),
];

struct HeaderRule {
    kind: SectionKind,
    lenient: Regex,
    strict: Regex,
}

static HEADER_RULES: LazyLock<Vec<HeaderRule>> = LazyLock::new(|| {
    HEADER_KEYWORDS
        .iter()
        .map(|(kind, keywords)| HeaderRule {
            kind: *kind,
            lenient: Regex::new(&format!(r"(?i){keywords}")).unwrap(),
            strict: Regex::new(&format!(
                r"(?i)^(?:(?:\d+|[ivxlc]+)\.?\s+)?(?:{keywords})\s*[:.]?$"
            ))
            .unwrap(),
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Header(SectionKind),
    Body(String),
    /// Too short to be a paragraph: page numbers, author lists, fragments.
    Noise(String),
}

/// Classify every non-blank line of `text`, trimmed, in source order.
pub fn classify_lines(text: &str, opts: &StructureOptions) -> Vec<Line> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| classify_line(line, opts))
        .collect()
}

fn classify_line(line: &str, opts: &StructureOptions) -> Line {
    let len = line.chars().count();

    if let Some(kind) = detect_header(line, len, opts) {
        return Line::Header(kind);
    }

    if len > opts.min_paragraph_chars {
        Line::Body(line.to_string())
    } else {
        Line::Noise(line.to_string())
    }
}

fn detect_header(line: &str, len: usize, opts: &StructureOptions) -> Option<SectionKind> {
    if len >= opts.max_header_chars {
        return None;
    }
    HEADER_RULES
        .iter()
        .find(|rule| match opts.header_mode {
            HeaderMode::Lenient => rule.lenient.is_match(line),
            HeaderMode::Strict => rule.strict.is_match(line),
        })
        .map(|rule| rule.kind)
}
