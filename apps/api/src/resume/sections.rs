//! Splits résumé feedback on the bold headings the reviewer prompt requests.

use serde::{Deserialize, Serialize};

const HEADINGS: [&str; 5] = [
    "**CLARITY:**",
    "**IMPACT:**",
    "**CONTENT:**",
    "**STRUCTURE:**",
    "**FULL FEEDBACK:**",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeedbackSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

impl ResumeFeedbackSections {
    fn slot(&mut self, index: usize) -> &mut Option<String> {
        match index {
            0 => &mut self.clarity,
            1 => &mut self.impact,
            2 => &mut self.content,
            3 => &mut self.structure,
            _ => &mut self.full,
        }
    }
}

/// Extracts each heading's body in order.
///
/// Each heading is searched for from just past the previous heading found.
/// A body ends where the next heading in the list begins, or at the end of
/// the text when that next heading is absent. Matching is exact.
pub fn parse_resume_feedback(raw: &str) -> ResumeFeedbackSections {
    let mut sections = ResumeFeedbackSections::default();
    let mut search_from = 0;

    for (i, heading) in HEADINGS.iter().enumerate() {
        let Some(offset) = raw[search_from..].find(heading) else {
            continue;
        };
        let start = search_from + offset;
        let body_start = start + heading.len();
        let end = HEADINGS
            .get(i + 1)
            .and_then(|next| raw[body_start..].find(next).map(|o| body_start + o))
            .unwrap_or(raw.len());

        let body = raw[body_start..end].trim();
        if !body.is_empty() {
            *sections.slot(i) = Some(body.to_string());
        }
        search_from = body_start;
    }

    sections
}
