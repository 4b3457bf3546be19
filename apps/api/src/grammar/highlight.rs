//! Grammar highlight overlay.
//!
//! Maps checker offsets onto the essay text and produces the segment list the
//! UI lays over its textarea: flagged spans become clickable errors carrying
//! their suggestion, meaningful words become clickable for lookup, and
//! everything else passes through as plain text. Offsets that do not fit the
//! current text are dropped rather than allowed to corrupt the output.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Serialize;

use crate::grammar::models::GrammarError;
use crate::markup::{escape_html, escape_multiline};

/// Words never made clickable.
const COMMON_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "but", "or", "for", "nor", "so", "yet", "as", "because", "since", "unless", "until",
    "while",
    // prepositions
    "at", "by", "to", "in", "on", "of", "off", "up", "out", "over", "from", "with", "without",
    "about", "above", "across", "after", "against", "along", "amid", "among", "around", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "during", "except", "inside",
    "outside", "through", "throughout", "toward", "towards", "under", "underneath", "upon", "via",
    "within",
    // pronouns
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "whose", "what", "which", "that", "this", "these", "those", "such", "anybody", "anyone",
    "anything", "each", "either", "everybody", "everyone", "everything", "little", "much",
    "neither", "nobody", "nothing", "one", "other", "somebody", "someone", "something",
    // auxiliaries
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "doing", "done",
    "have", "has", "had", "having", "can", "could", "may", "might", "must", "shall", "should",
    "will", "would",
    // adverbs
    "not", "no", "too", "very", "just", "now", "then", "here", "there", "when", "where", "why",
    "how", "again", "almost", "already", "always", "even", "ever", "never", "often", "only",
    "quite", "really", "seldom", "sometimes", "still", "usually", "also", "else", "especially",
    "mainly", "mostly",
    // numbers
    "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "first", "second",
    "third",
    // time
    "day", "days", "week", "weeks", "month", "months", "year", "years", "today", "tomorrow",
    "yesterday",
];

fn common_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| COMMON_WORDS.iter().copied().collect())
}

fn is_separator_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | '"' | '(' | ')' | '[' | ']' | '{' | '}'
    )
}

/// A word is meaningful when, with everything but letters, digits and
/// apostrophes removed, it is longer than one character and not common.
pub fn is_meaningful_word(word: &str) -> bool {
    let clean: String = word
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .flat_map(char::to_lowercase)
        .collect();
    clean.chars().count() > 1 && !common_words().contains(clean.as_str())
}

/// Splits text into words, whitespace runs and single separator
/// punctuation marks. Concatenating the pieces gives back the input.
pub fn split_words(text: &str) -> Vec<&str> {
    #[derive(PartialEq, Clone, Copy)]
    enum Kind {
        Space,
        Word,
    }

    let mut pieces = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<Kind> = None;

    for (i, c) in text.char_indices() {
        if is_separator_punct(c) {
            if run_kind.is_some() {
                pieces.push(&text[run_start..i]);
                run_kind = None;
            }
            pieces.push(&text[i..i + c.len_utf8()]);
            run_start = i + c.len_utf8();
            continue;
        }
        let kind = if c.is_whitespace() {
            Kind::Space
        } else {
            Kind::Word
        };
        match run_kind {
            Some(k) if k == kind => {}
            Some(_) => {
                pieces.push(&text[run_start..i]);
                run_start = i;
                run_kind = Some(kind);
            }
            None => {
                run_start = i;
                run_kind = Some(kind);
            }
        }
    }
    if run_kind.is_some() {
        pieces.push(&text[run_start..]);
    }
    pieces
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Whitespace, punctuation and common words.
    Plain { text: String },
    /// A meaningful word the reader can click.
    Word { text: String },
    /// A flagged span with its correction.
    Error {
        /// `<start>-<end>`, stable across re-renders of the same check.
        id: String,
        text: String,
        start: usize,
        end: usize,
        suggestion: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub segments: Vec<Segment>,
    /// Number of errors that were placed on the text.
    pub error_count: usize,
}

impl Overlay {
    /// Renders the overlay as the HTML fragment the highlight layer displays.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => html.push_str(&escape_multiline(text)),
                Segment::Word { text } => {
                    html.push_str(&format!(
                        r#"<span class="clickable-word" data-word="{}">{}</span>"#,
                        escape_html(text),
                        escape_multiline(text)
                    ));
                }
                Segment::Error {
                    id,
                    text,
                    suggestion,
                    reason,
                    ..
                } => {
                    html.push_str(&format!(
                        r#"<span class="grammar-error" data-error-id="{}" data-reason="{}" data-suggestion="{}" data-word="{}">{}</span>"#,
                        id,
                        escape_html(reason),
                        escape_html(suggestion),
                        escape_html(text),
                        escape_multiline(text)
                    ));
                }
            }
        }
        html
    }
}

/// Maps UTF-16 code unit offsets, the unit the browser editor counts in, to
/// byte offsets. Positions that fall inside a surrogate pair are not
/// boundaries and never start or end a span.
struct CharMap<'a> {
    text: &'a str,
    bounds: Vec<usize>,
    boundary: Vec<bool>,
}

impl<'a> CharMap<'a> {
    fn new(text: &'a str) -> Self {
        let mut bounds = Vec::with_capacity(text.len() + 1);
        let mut boundary = Vec::with_capacity(text.len() + 1);
        for (i, c) in text.char_indices() {
            bounds.push(i);
            boundary.push(true);
            if c.len_utf16() == 2 {
                bounds.push(i);
                boundary.push(false);
            }
        }
        bounds.push(text.len());
        boundary.push(true);
        Self {
            text,
            bounds,
            boundary,
        }
    }

    fn unit_len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Converts a checker span to a checked `[start, end)` unit range.
    fn span(&self, error: &GrammarError) -> Option<(usize, usize)> {
        let start = usize::try_from(error.start_index?).ok()?;
        let end = usize::try_from(error.end_index?).ok()?;
        (start < end && end <= self.unit_len() && self.boundary[start] && self.boundary[end])
            .then_some((start, end))
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[end]]
    }
}

/// Errors that fit the text, sorted by start, with overlaps removed
/// (the earlier-starting span wins).
fn placeable<'e>(map: &CharMap<'_>, errors: &'e [GrammarError]) -> Vec<(usize, usize, &'e GrammarError)> {
    let mut spans: Vec<_> = errors
        .iter()
        .filter_map(|e| map.span(e).map(|(s, t)| (s, t, e)))
        .collect();
    spans.sort_by_key(|(start, end, _)| (*start, *end));

    let mut placed = Vec::with_capacity(spans.len());
    let mut covered_to = 0;
    for (start, end, error) in spans {
        if start < covered_to {
            continue;
        }
        covered_to = end;
        placed.push((start, end, error));
    }
    placed
}

fn push_words(segments: &mut Vec<Segment>, text: &str) {
    for piece in split_words(text) {
        let text = piece.to_string();
        if !piece.trim().is_empty() && is_meaningful_word(piece) {
            segments.push(Segment::Word { text });
        } else {
            segments.push(Segment::Plain { text });
        }
    }
}

/// Builds the overlay for `text`.
///
/// With checking disabled the errors are ignored and only word segments are
/// produced. Otherwise every error whose span fits the text and does not
/// overlap an earlier one becomes an `Error` segment.
pub fn build_overlay(text: &str, errors: &[GrammarError], checking_enabled: bool) -> Overlay {
    let mut segments = Vec::new();

    if !checking_enabled {
        push_words(&mut segments, text);
        return Overlay {
            segments,
            error_count: 0,
        };
    }

    let map = CharMap::new(text);
    let placed = placeable(&map, errors);
    let mut last = 0;

    for &(start, end, error) in &placed {
        push_words(&mut segments, map.slice(last, start));
        segments.push(Segment::Error {
            id: format!("{start}-{end}"),
            text: map.slice(start, end).to_string(),
            start,
            end,
            suggestion: error.suggestion.clone(),
            reason: error.reason.clone(),
        });
        last = end;
    }
    push_words(&mut segments, map.slice(last, map.unit_len()));

    Overlay {
        segments,
        error_count: placed.len(),
    }
}

/// Replaces one flagged span with its suggestion.
/// Returns the text unchanged when the span does not fit or there is no suggestion.
pub fn apply_correction(text: &str, error: &GrammarError) -> String {
    let map = CharMap::new(text);
    match map.span(error) {
        Some((start, end)) if !error.suggestion.is_empty() => format!(
            "{}{}{}",
            map.slice(0, start),
            error.suggestion,
            map.slice(end, map.unit_len())
        ),
        _ => text.to_string(),
    }
}

/// Applies every placeable suggestion, working from the end of the text so
/// that earlier offsets stay valid.
pub fn apply_all_corrections(text: &str, errors: &[GrammarError]) -> String {
    let map = CharMap::new(text);
    let mut corrected = text.to_string();
    for (start, end, error) in placeable(&map, errors).into_iter().rev() {
        if error.suggestion.is_empty() {
            continue;
        }
        corrected.replace_range(map.bounds[start]..map.bounds[end], &error.suggestion);
    }
    corrected
}
