use serde::{Deserialize, Serialize};

use crate::settings::Locale;

/// A structured article: ordered sections of ordered paragraphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub status: SectionStatus,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: String,
    pub text: String,
    pub function: ParagraphFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Abstract,
    Introduction,
    Methods,
    Results,
    Discussion,
    Conclusion,
    References,
    /// Catch-all kind of the full-text fallback section.
    General,
}

impl SectionKind {
    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Abstract => "abstract",
            SectionKind::Introduction => "introduction",
            SectionKind::Methods => "methods",
            SectionKind::Results => "results",
            SectionKind::Discussion => "discussion",
            SectionKind::Conclusion => "conclusion",
            SectionKind::References => "references",
            SectionKind::General => "full-text",
        }
    }

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SectionKind::Abstract, Locale::Pt) => "Resumo",
            (SectionKind::Abstract, Locale::En) => "Abstract",
            (SectionKind::Introduction, Locale::Pt) => "Introdução",
            (SectionKind::Introduction, Locale::En) => "Introduction",
            (SectionKind::Methods, Locale::Pt) => "Métodos",
            (SectionKind::Methods, Locale::En) => "Methods",
            (SectionKind::Results, Locale::Pt) => "Resultados",
            (SectionKind::Results, Locale::En) => "Results",
            (SectionKind::Discussion, Locale::Pt) => "Discussão",
            (SectionKind::Discussion, Locale::En) => "Discussion",
            (SectionKind::Conclusion, Locale::Pt) => "Conclusão",
            (SectionKind::Conclusion, Locale::En) => "Conclusion",
            (SectionKind::References, Locale::Pt) => "Referências",
            (SectionKind::References, Locale::En) => "References",
            (SectionKind::General, Locale::Pt) => "Texto Completo",
            (SectionKind::General, Locale::En) => "Full text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    #[default]
    Unread,
    InProgress,
    Read,
}

impl SectionStatus {
    /// Parse the serialized name (`unread`, `in-progress`, `read`).
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "unread" => Some(SectionStatus::Unread),
            "in-progress" => Some(SectionStatus::InProgress),
            "read" => Some(SectionStatus::Read),
            _ => None,
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SectionStatus::Unread, Locale::Pt) => "Não lido",
            (SectionStatus::Unread, Locale::En) => "Unread",
            (SectionStatus::InProgress, Locale::Pt) => "Em progresso",
            (SectionStatus::InProgress, Locale::En) => "In progress",
            (SectionStatus::Read, Locale::Pt) => "Lido",
            (SectionStatus::Read, Locale::En) => "Read",
        }
    }
}

/// Rhetorical role of a paragraph. Only meaningful relative to the kind of
/// the section the paragraph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphFunction {
    Objective,
    Results,
    Conclusion,
    Summary,
    Context,
    Gap,
    Problem,
    Participants,
    Intervention,
    Measures,
    Procedure,
    Design,
    Sample,
    MainFinding,
    SecondaryFinding,
    NullFinding,
    Finding,
    Limitations,
    FutureDirections,
    Interpretation,
    Comparison,
    General,
}

impl ParagraphFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            ParagraphFunction::Objective => "objective",
            ParagraphFunction::Results => "results",
            ParagraphFunction::Conclusion => "conclusion",
            ParagraphFunction::Summary => "summary",
            ParagraphFunction::Context => "context",
            ParagraphFunction::Gap => "gap",
            ParagraphFunction::Problem => "problem",
            ParagraphFunction::Participants => "participants",
            ParagraphFunction::Intervention => "intervention",
            ParagraphFunction::Measures => "measures",
            ParagraphFunction::Procedure => "procedure",
            ParagraphFunction::Design => "design",
            ParagraphFunction::Sample => "sample",
            ParagraphFunction::MainFinding => "main_finding",
            ParagraphFunction::SecondaryFinding => "secondary_finding",
            ParagraphFunction::NullFinding => "null_finding",
            ParagraphFunction::Finding => "finding",
            ParagraphFunction::Limitations => "limitations",
            ParagraphFunction::FutureDirections => "future_directions",
            ParagraphFunction::Interpretation => "interpretation",
            ParagraphFunction::Comparison => "comparison",
            ParagraphFunction::General => "general",
        }
    }
}

impl Document {
    /// Paragraphs in reading order: sections first, then paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = (&Section, &Paragraph)> {
        self.sections
            .iter()
            .flat_map(|s| s.paragraphs.iter().map(move |p| (s, p)))
    }

    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// True when the document came out of the full-text fallback.
    pub fn is_full_text(&self) -> bool {
        matches!(self.sections.as_slice(), [only] if only.kind == SectionKind::General)
    }
}
