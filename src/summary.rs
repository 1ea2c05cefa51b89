use serde::Serialize;

use crate::model::{ParagraphFunction, Section};

/// How much of a section to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    /// Three sentences.
    Short,
    /// One paragraph built from the leading sentence of up to six paragraphs.
    Long,
}

impl SummaryLength {
    fn sentences(self) -> usize {
        match self {
            SummaryLength::Short => 3,
            SummaryLength::Long => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub section_id: String,
    pub section_title: String,
    pub length: SummaryLength,
    /// Paragraphs the sentences were taken from, in reading order.
    pub sources: Vec<String>,
    pub text: String,
}

/// Lower ranks are picked first; anything unlisted ranks last.
fn rank(function: ParagraphFunction) -> usize {
    use ParagraphFunction::*;
    const PRIORITY: &[ParagraphFunction] = &[
        MainFinding,
        Objective,
        Conclusion,
        Results,
        ParagraphFunction::Summary,
        NullFinding,
        Problem,
        Gap,
        Design,
        Intervention,
        Participants,
        Limitations,
        Interpretation,
        SecondaryFinding,
        Finding,
        Comparison,
        FutureDirections,
    ];
    PRIORITY
        .iter()
        .position(|f| *f == function)
        .unwrap_or(PRIORITY.len())
}

/// First sentence of a paragraph: up to the first `.`, `!` or `?` that is
/// followed by whitespace, so decimals like `p<0.001` stay intact.
fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|(_, n)| n.is_whitespace()) {
            return &text[..i + c.len_utf8()];
        }
    }
    text
}

/// Extractive summary of one section: the leading sentence of its
/// highest-ranked paragraphs, restored to reading order. `None` for a
/// section without paragraphs.
pub fn summarize_section(section: &Section, length: SummaryLength) -> Option<Summary> {
    let mut picked: Vec<(usize, usize)> = section
        .paragraphs
        .iter()
        .enumerate()
        .map(|(i, p)| (rank(p.function), i))
        .collect();
    // stable on rank, ties keep reading order
    picked.sort();
    picked.truncate(length.sentences());
    if picked.is_empty() {
        return None;
    }
    picked.sort_by_key(|&(_, i)| i);

    let chosen: Vec<_> = picked.iter().map(|&(_, i)| &section.paragraphs[i]).collect();
    Some(Summary {
        section_id: section.id.clone(),
        section_title: section.title.clone(),
        length,
        sources: chosen.iter().map(|p| p.id.clone()).collect(),
        text: chosen
            .iter()
            .map(|p| first_sentence(&p.text))
            .collect::<Vec<_>>()
            .join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crate::parser::structure_article;
    use crate::settings::StructureOptions;

    fn article() -> Document {
        let text = std::fs::read_to_string("tests/fixtures/tdah_article.txt").unwrap();
        structure_article(&text, None, &StructureOptions::default())
    }

    #[test]
    fn sentence_split_keeps_decimals() {
        assert_eq!(
            first_sentence("Redução em desatenção, p<0.001. O efeito foi grande."),
            "Redução em desatenção, p<0.001."
        );
        assert_eq!(first_sentence("  Sem ponto final "), "Sem ponto final");
    }

    #[test]
    fn short_summary_prefers_findings_and_objectives() {
        let doc = article();
        let results = doc.section("results").unwrap();
        let summary = summarize_section(results, SummaryLength::Short).unwrap();
        // finding, main_finding, null_finding: all three kept
        assert_eq!(summary.sources, ["p12", "p13", "p14"]);
        assert!(summary.text.contains("p<0.001"));
        assert_eq!(summary.section_title, "Resultados");

        let intro = doc.section("introduction").unwrap();
        let summary = summarize_section(intro, SummaryLength::Short).unwrap();
        // objective, problem and gap outrank the opening context paragraph
        assert_eq!(summary.sources, ["p5", "p6", "p7"]);
    }

    #[test]
    fn long_summary_covers_small_sections() {
        let doc = article();
        let methods = doc.section("methods").unwrap();
        let summary = summarize_section(methods, SummaryLength::Long).unwrap();
        assert_eq!(summary.sources.len(), methods.paragraphs.len());
        assert!(summary.text.starts_with(first_sentence(&methods.paragraphs[0].text)));
    }

    #[test]
    fn empty_section_has_no_summary() {
        let mut section = article().sections.remove(0);
        section.paragraphs.clear();
        assert!(summarize_section(&section, SummaryLength::Long).is_none());
    }
}
