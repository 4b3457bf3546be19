//! A4 PDF rendering of an essay and its feedback.
//!
//! Layout is computed first as a list of placed lines (page, offset from the
//! top edge, font size), then drawn with Helvetica. Lines wrap to the text
//! width using Helvetica's advance widths, and a new page starts whenever the
//! next line would cross the bottom margin.

use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - MARGIN_MM * 2.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

const TITLE_SIZE_PT: f32 = 18.0;
const TITLE_LINE_MM: f32 = 10.0;
const HEADER_SIZE_PT: f32 = 14.0;
const HEADER_LINE_MM: f32 = 8.0;
const BODY_SIZE_PT: f32 = 12.0;
const BODY_LINE_MM: f32 = 7.0;
const SECTION_GAP_MM: f32 = 10.0;

/// Helvetica advance widths in 1/1000 em for ASCII 0x20..=0x7E.
/// Index = (char as usize) - 32.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, // A-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556,
    333, 500, 278, 556, 500, 722, 500, 500, 500, // a-z
    334, 260, 334, 584, // {..~
];
/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

fn char_width_mm(c: char, size_pt: f32) -> f32 {
    let code = c as usize;
    let units = if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[code - 32]
    } else {
        FALLBACK_WIDTH
    };
    f32::from(units) / 1000.0 * size_pt * PT_TO_MM
}

pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().map(|c| char_width_mm(c, size_pt)).sum()
}

/// Breaks `text` into lines no wider than `max_width_mm`.
///
/// Explicit newlines are kept (blank lines included). Words wrap at spaces;
/// a word wider than a whole line is split between characters.
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line = String::new();
        let mut width = 0.0;

        for word in paragraph.split(' ') {
            let word_width = text_width_mm(word, size_pt);
            let space = if line.is_empty() {
                0.0
            } else {
                char_width_mm(' ', size_pt)
            };

            if width + space + word_width <= max_width_mm {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                width += space + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            for c in word.chars() {
                let w = char_width_mm(c, size_pt);
                if width + w > max_width_mm && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    width = 0.0;
                }
                line.push(c);
                width += w;
            }
        }
        lines.push(line);
    }
    lines
}

/// One line of text at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub page: usize,
    /// Baseline distance from the top edge of the page.
    pub top_mm: f32,
    pub size_pt: f32,
    pub text: String,
}

struct Cursor {
    page: usize,
    top_mm: f32,
    lines: Vec<PlacedLine>,
}

impl Cursor {
    fn place(&mut self, text: String, size_pt: f32, line_height_mm: f32) {
        if self.top_mm + line_height_mm > PAGE_HEIGHT_MM - MARGIN_MM {
            self.page += 1;
            self.top_mm = MARGIN_MM;
        }
        self.lines.push(PlacedLine {
            page: self.page,
            top_mm: self.top_mm,
            size_pt,
            text,
        });
        self.top_mm += line_height_mm;
    }

    fn place_wrapped(&mut self, text: &str, size_pt: f32, line_height_mm: f32) {
        for line in wrap_text(text, size_pt, TEXT_WIDTH_MM) {
            self.place(line, size_pt, line_height_mm);
        }
    }
}

/// Positions the title, the essay and the feedback. Returns the lines and
/// the number of pages they span.
pub fn layout_essay_pdf(title: &str, essay: &str, feedback: &str) -> (Vec<PlacedLine>, usize) {
    let mut cursor = Cursor {
        page: 0,
        top_mm: MARGIN_MM,
        lines: Vec::new(),
    };

    cursor.place_wrapped(
        &format!("Feedback for \"{title}\""),
        TITLE_SIZE_PT,
        TITLE_LINE_MM,
    );
    cursor.top_mm += SECTION_GAP_MM;
    cursor.place("Original Essay:".to_string(), HEADER_SIZE_PT, HEADER_LINE_MM);
    cursor.place_wrapped(essay, BODY_SIZE_PT, BODY_LINE_MM);

    cursor.top_mm += SECTION_GAP_MM;
    cursor.place("Feedback:".to_string(), HEADER_SIZE_PT, HEADER_LINE_MM);
    cursor.place_wrapped(feedback, BODY_SIZE_PT, BODY_LINE_MM);

    let pages = cursor.page + 1;
    (cursor.lines, pages)
}

/// Renders the laid-out document to PDF bytes.
pub fn render_essay_pdf(title: &str, essay: &str, feedback: &str) -> anyhow::Result<Vec<u8>> {
    let (lines, pages) = layout_essay_pdf(title, essay, feedback);

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Feedback for {title}"),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Text",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..pages {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Text");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in lines.iter().filter(|l| !l.text.is_empty()) {
        layers[line.page].use_text(
            line.text.as_str(),
            line.size_pt,
            Mm(MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - line.top_mm),
            &font,
        );
    }
    drop(layers);

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width_and_newlines() {
        let text = "word ".repeat(60);
        let lines = wrap_text(text.trim_end(), BODY_SIZE_PT, TEXT_WIDTH_MM);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, BODY_SIZE_PT) <= TEXT_WIDTH_MM);
        }
        assert_eq!(lines.join(" "), text.trim_end());

        assert_eq!(
            wrap_text("one\n\ntwo", BODY_SIZE_PT, TEXT_WIDTH_MM),
            vec!["one", "", "two"]
        );
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, BODY_SIZE_PT, TEXT_WIDTH_MM);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_layout_order_and_first_positions() {
        let (lines, pages) = layout_essay_pdf("Grit", "I ran.", "Good.");
        assert_eq!(pages, 1);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Feedback for \"Grit\"", "Original Essay:", "I ran.", "Feedback:", "Good."]
        );
        assert_eq!(lines[0].top_mm, MARGIN_MM);
        assert_eq!(lines[0].size_pt, TITLE_SIZE_PT);
        // Title line, then the section gap.
        assert_eq!(lines[1].top_mm, MARGIN_MM + TITLE_LINE_MM + SECTION_GAP_MM);
        assert_eq!(lines[2].size_pt, BODY_SIZE_PT);
    }

    #[test]
    fn test_long_essay_breaks_pages_at_margin() {
        let essay = "Paragraph line.\n".repeat(100);
        let (lines, pages) = layout_essay_pdf("Long", &essay, "Fine.");
        assert!(pages >= 3);
        for line in &lines {
            assert!(line.top_mm >= MARGIN_MM);
            assert!(line.top_mm <= PAGE_HEIGHT_MM - MARGIN_MM);
        }
        let second_page_first = lines.iter().find(|l| l.page == 1).unwrap();
        assert_eq!(second_page_first.top_mm, MARGIN_MM);
        assert_eq!(lines.last().unwrap().page, pages - 1);
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_essay_pdf("Grit", "I ran.\nFar.", "Good.").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
