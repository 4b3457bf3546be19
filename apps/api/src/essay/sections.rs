//! Splits one essay-feedback string into labeled categories by locating the
//! headings the counselor prompt asks the model to emit.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Headings in the order the model emits them. Matching is case-insensitive.
const HEADINGS: &[(&str, Category)] = &[
    ("Feedback and Areas of Improvement:", Category::General),
    ("GRAMMAR:", Category::Grammar),
    ("STRUCTURE:", Category::Structure),
    ("CONTENT:", Category::Content),
    ("LANGUAGE:", Category::Language),
    ("OVERALL assessment:", Category::Overall),
    ("OVERALL:", Category::Overall),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    General,
    Grammar,
    Structure,
    Content,
    Language,
    /// Folded into `general`.
    Overall,
}

/// Essay feedback split by heading. Absent or empty sections are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EssayFeedbackSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl EssayFeedbackSections {
    pub fn is_empty(&self) -> bool {
        self.general.is_none()
            && self.grammar.is_none()
            && self.structure.is_none()
            && self.content.is_none()
            && self.language.is_none()
    }

    fn assign(&mut self, category: Category, body: &str) {
        let body = body.trim();
        if body.is_empty() {
            return;
        }
        let slot = match category {
            Category::General => &mut self.general,
            Category::Grammar => &mut self.grammar,
            Category::Structure => &mut self.structure,
            Category::Content => &mut self.content,
            Category::Language => &mut self.language,
            Category::Overall => {
                self.general = Some(match self.general.take() {
                    Some(existing) => format!("{existing}\n\n{body}"),
                    None => body.to_string(),
                });
                return;
            }
        };
        *slot = Some(body.to_string());
    }
}

struct HeadingPatterns {
    /// Matches any heading; alternation order is `HEADINGS` order.
    any: Regex,
    /// `later[i]` matches any heading after `HEADINGS[i]`; `None` for the last one.
    later: Vec<Option<Regex>>,
}

fn alternation(headings: &[(&str, Category)]) -> Regex {
    let pattern = headings
        .iter()
        .map(|(h, _)| regex::escape(h))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("heading pattern is a valid regex")
}

fn patterns() -> &'static HeadingPatterns {
    static PATTERNS: OnceLock<HeadingPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| HeadingPatterns {
        any: alternation(HEADINGS),
        later: (0..HEADINGS.len())
            .map(|i| {
                let rest = &HEADINGS[i + 1..];
                (!rest.is_empty()).then(|| alternation(rest))
            })
            .collect(),
    })
}

fn heading_index(matched: &str) -> Option<usize> {
    HEADINGS
        .iter()
        .position(|(h, _)| h.eq_ignore_ascii_case(matched))
}

/// Splits raw essay feedback into categories.
///
/// Text before the first heading is dropped. Each heading's body runs up to
/// the next occurrence of a heading that comes *later* in the expected order,
/// or to the end of the text. "OVERALL" bodies are appended to `general`.
pub fn parse_essay_feedback(raw: &str) -> EssayFeedbackSections {
    let normalized = raw.replace("\r\n", "\n");
    let text = normalized.trim();
    let patterns = patterns();
    let mut sections = EssayFeedbackSections::default();

    let mut pos = 0;
    while let Some(m) = patterns.any.find_at(text, pos) {
        let Some(index) = heading_index(m.as_str()) else {
            pos = m.end();
            continue;
        };
        let body_start = m.end();
        let body_end = patterns.later[index]
            .as_ref()
            .and_then(|re| re.find_at(text, body_start))
            .map(|next| next.start())
            .unwrap_or(text.len());

        sections.assign(HEADINGS[index].1, &text[body_start..body_end]);
        pos = body_end;
    }

    sections
}
