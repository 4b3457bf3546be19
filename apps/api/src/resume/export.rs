//! Word-compatible résumé document.
//!
//! Word opens HTML served as `application/msword`; the layout uses tables
//! because Word ignores most CSS positioning.

use crate::essay::export::ExportDocument;
use crate::markup::escape_html;
use crate::resume::form::{Activity, ResumeForm};

const SECTION_TITLE_STYLE: &str = "font-size:19px;font-weight:bold;text-transform:uppercase;letter-spacing:1px;color:#222;margin-bottom:2px;margin-top:0;text-align:left;";
const CELL_LEFT_STYLE: &str = "text-align:left;font-weight:bold;font-size:17px;vertical-align:top;";
const CELL_RIGHT_STYLE: &str = "text-align:right;font-size:17px;vertical-align:top;";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn table_section(title: &str, rows: &[String]) -> String {
    format!(
        r#"<div style="{SECTION_TITLE_STYLE}">{title}</div><table style="width:100%;border-collapse:collapse;margin-bottom:12px;">{}</table>"#,
        rows.concat()
    )
}

fn text_section(title: &str, body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    format!(
        r#"<div style="{SECTION_TITLE_STYLE}">{title}</div><div style="font-size:17px;margin-bottom:12px;">{}</div>"#,
        escape_html(body)
    )
}

fn italic_block(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="font-style:italic;font-size:17px;">{}</div>"#,
            escape_html(value)
        )
    }
}

fn activity_rows(activity: &Activity) -> String {
    let location = if activity.location.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span style="font-style:italic;">{}</span>"#,
            escape_html(&activity.location)
        )
    };
    let mut rows = format!(
        r#"<tr><td style="{CELL_LEFT_STYLE}width:60%;">{}{}</td><td style="{CELL_RIGHT_STYLE}width:40%;">{}<br/>{}</td></tr>"#,
        escape_html(or_placeholder(&activity.position, "[Role]")),
        italic_block(&activity.organization),
        escape_html(or_placeholder(&activity.dates, "[Dates]")),
        location,
    );

    let bullets = activity.bullets();
    if !bullets.is_empty() {
        let items: String = bullets
            .iter()
            .map(|b| format!(r#"<li style="margin-bottom:0;">{}</li>"#, escape_html(b)))
            .collect();
        rows.push_str(&format!(
            r#"<tr><td colspan="2" style="padding-left:24px;padding-top:0;"><ul style="margin:0 0 8px 0;padding-left:18px;font-size:17px;line-height:1.2;">{items}</ul></td></tr>"#
        ));
    }
    rows
}

/// Renders the résumé as `resume.doc`.
pub fn render_resume_doc(form: &ResumeForm) -> ExportDocument {
    let student = &form.student;
    let education = &form.education;

    let header = format!(
        r#"<div style="text-align:center;margin-bottom:12px;"><div style="font-size:28px;font-weight:bold;letter-spacing:0.5px;">{}</div><div style="font-size:17px;color:#444;margin-bottom:8px;">{} | {}</div></div><hr style="border:none;border-top:1.5px solid #bbb;margin:12px 0 18px 0;" />"#,
        escape_html(or_placeholder(&student.name, "Student Name")),
        escape_html(or_placeholder(&student.phone, "123-456-7890")),
        escape_html(or_placeholder(&student.email, "email@example.com")),
    );

    let education_row = format!(
        r#"<tr><td style="{CELL_LEFT_STYLE}">{}{}</td><td style="{CELL_RIGHT_STYLE}">{}<br/><span style="font-style:italic;">{}</span></td></tr>"#,
        escape_html(or_placeholder(&education.school, "[School Name]")),
        italic_block(&education.awards),
        escape_html(or_placeholder(&education.location, "[Location]")),
        escape_html(or_placeholder(&education.date, "[Date]")),
    );

    let experience_rows: Vec<String> = form
        .activities
        .iter()
        .filter(|a| !a.is_blank())
        .map(activity_rows)
        .collect();

    let body = format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Resume</title></head><body style="font-family:Times New Roman,Times,serif;font-size:17px;color:#222;">{header}{}{}{}{}</body></html>"#,
        table_section("Education", &[education_row]),
        table_section("Experience", &experience_rows),
        text_section("Skills", &form.skills),
        text_section("Languages", &form.languages),
    );

    ExportDocument {
        file_name: "resume.doc".to_string(),
        content_type: "application/msword",
        body: body.into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::form::StudentInfo;

    #[test]
    fn test_placeholders_for_empty_form() {
        let doc = render_resume_doc(&ResumeForm::default());
        assert_eq!(doc.file_name, "resume.doc");
        assert!(doc.text().contains("Student Name"));
        assert!(doc.text().contains("123-456-7890 | email@example.com"));
        assert!(doc.text().contains("[School Name]"));
        assert!(doc.text().contains("[Location]"));
        assert!(doc.text().contains("[Date]"));
        assert!(!doc.text().contains(">Skills<"));
        assert!(!doc.text().contains(">Languages<"));
    }

    #[test]
    fn test_blank_activities_omitted_and_bullets_rendered() {
        let form = ResumeForm {
            activities: vec![
                Activity::default(),
                Activity {
                    organization: "Debate <Team>".into(),
                    description: "Won regionals. Coached novices.".into(),
                    ..Default::default()
                },
            ],
            skills: "Python".into(),
            ..Default::default()
        };
        let doc = render_resume_doc(&form);
        assert_eq!(doc.text().matches("[Role]").count(), 1);
        assert!(doc.text().contains("[Dates]"));
        assert!(doc.text().contains("Debate &lt;Team&gt;"));
        assert!(doc.text().contains(r#"<li style="margin-bottom:0;">Won regionals.</li>"#));
        assert!(doc.text().contains(r#"<li style="margin-bottom:0;">Coached novices.</li>"#));
        assert!(doc.text().contains(">Skills</div>"));
    }

    #[test]
    fn test_student_fields_escaped() {
        let form = ResumeForm {
            student: StudentInfo {
                name: "Ana & Co".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(render_resume_doc(&form).text().contains("Ana &amp; Co"));
    }
}
