use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ParagraphFunction, SectionKind};

use ParagraphFunction::*;

// Additive phrases ("not only X but also Y") carry no negation.
static ADDITIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:não\s+(?:apenas|só|somente)|not\s+(?:only|just))\b").unwrap()
});

// Bare "no" is a Portuguese preposition ("no grupo"); only count it before
// the words that make an English null result.
static NEGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:não|nao|nem|nenhum|nenhuma|sem|not|without|neither|nor|no\s+(?:significant|statistically|differences?|effects?|changes?))\b",
    )
    .unwrap()
});

fn is_negated(lower: &str) -> bool {
    NEGATION_RE.is_match(&ADDITIVE_RE.replace_all(lower, " "))
}

/// Matches when the lowercased text contains one of `any` and, if `also`
/// is non-empty, one of `also` as well. A `negated` rule additionally needs
/// a negation word.
struct Rule {
    any: &'static [&'static str],
    also: &'static [&'static str],
    negated: bool,
    function: ParagraphFunction,
}

impl Rule {
    fn matches(&self, lower: &str) -> bool {
        let hit = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
        hit(self.any)
            && (self.also.is_empty() || hit(self.also))
            && (!self.negated || is_negated(lower))
    }
}

const fn any(needles: &'static [&'static str], function: ParagraphFunction) -> Rule {
    Rule {
        any: needles,
        also: &[],
        negated: false,
        function,
    }
}

static NO_RULES: &[Rule] = &[];

static ABSTRACT_RULES: &[Rule] = &[
    any(&["objetivo", "objective"], Objective),
    any(&["resultado", "result"], Results),
    any(&["conclus"], Conclusion),
];

static INTRODUCTION_RULES: &[Rule] = &[
    any(&["objetivo", "aim"], Objective),
    any(&["lacuna", "gap"], Gap),
    any(&["problema", "problem"], Problem),
];

static METHODS_RULES: &[Rule] = &[
    any(&["participante", "participant"], Participants),
    any(&["interven", "treatment"], Intervention),
    any(&["medida", "measure"], Measures),
    any(&["procedimento", "procedure"], Procedure),
];

// Null findings first: they also mention significance.
static RESULTS_RULES: &[Rule] = &[
    Rule {
        any: &["significat", "significan"],
        also: &[],
        negated: true,
        function: NullFinding,
    },
    any(&["significat", "significan", "p<", "p ="], MainFinding),
];

static DISCUSSION_RULES: &[Rule] = &[
    any(&["limita", "limitation"], Limitations),
    any(&["futuro", "future"], FutureDirections),
    any(&["interpreta", "interpret"], Interpretation),
];

fn ruleset(kind: SectionKind) -> (&'static [Rule], ParagraphFunction) {
    match kind {
        SectionKind::Abstract => (ABSTRACT_RULES, Summary),
        SectionKind::Introduction => (INTRODUCTION_RULES, Context),
        SectionKind::Methods => (METHODS_RULES, Design),
        SectionKind::Results => (RESULTS_RULES, Finding),
        SectionKind::Discussion => (DISCUSSION_RULES, Comparison),
        SectionKind::Conclusion | SectionKind::References | SectionKind::General => {
            (NO_RULES, General)
        }
    }
}

/// Infer the rhetorical function of a paragraph from its section kind.
pub fn infer_function(text: &str, kind: SectionKind) -> ParagraphFunction {
    let lower = text.to_lowercase();
    let (rules, fallback) = ruleset(kind);
    rules
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.function)
        .unwrap_or(fallback)
}
