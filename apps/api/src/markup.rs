//! Small HTML helpers shared by the highlight overlay and the Word exports.

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `text` and renders its line breaks as `<br>`.
pub fn escape_multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}
