//! Downloadable essay-feedback documents: plain text, Word-compatible HTML
//! and PDF.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::essay::pdf::render_essay_pdf;
use crate::markup::escape_multiline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Doc,
    Pdf,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "doc" => Ok(ExportFormat::Doc),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(AppError::Validation(format!(
                "Unsupported export format '{other}' (expected txt, doc or pdf)"
            ))),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Doc => "doc",
            ExportFormat::Pdf => "pdf",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Doc => "application/msword",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A rendered file, sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

#[cfg(test)]
impl ExportDocument {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

impl IntoResponse for ExportDocument {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}

/// `feedback-<title>` with whitespace runs collapsed to `-`, lowercased.
/// Characters that are unsafe in a header filename are dropped.
pub fn feedback_file_stem(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            slug.push(c.to_ascii_lowercase());
        }
    }
    if slug.is_empty() {
        slug.push_str("essay");
    }
    format!("feedback-{slug}")
}

pub fn render_essay_export(
    format: ExportFormat,
    title: &str,
    essay: &str,
    feedback: &str,
) -> Result<ExportDocument, AppError> {
    let body = match format {
        ExportFormat::Txt => render_txt(title, essay, feedback).into_bytes(),
        ExportFormat::Doc => render_doc(title, essay, feedback).into_bytes(),
        ExportFormat::Pdf => render_essay_pdf(title, essay, feedback)?,
    };
    Ok(ExportDocument {
        file_name: format!("{}.{}", feedback_file_stem(title), format.extension()),
        content_type: format.content_type(),
        body,
    })
}

fn render_txt(title: &str, essay: &str, feedback: &str) -> String {
    format!(
        "Essay Title: {title} \n--- ORIGINAL ESSAY ---\n{essay}\n\n--- FEEDBACK ---\n{feedback}"
    )
}

fn render_doc(title: &str, essay: &str, feedback: &str) -> String {
    let title = escape_multiline(title);
    format!(
        r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:w="urn:schemas-microsoft-com:office:word" xmlns="http://www.w3.org/TR/REC-html40">
<head>
<meta charset="utf-8">
<title>Feedback for {title}</title>
</head>
<body>
<h1>Feedback for "{title}"</h1>
<h2>Original Essay</h2>
<div class="essay">{essay}</div>
<h2>Feedback</h2>
<div class="feedback">{feedback}</div>
</body>
</html>
"#,
        essay = escape_multiline(essay),
        feedback = escape_multiline(feedback),
    )
}
