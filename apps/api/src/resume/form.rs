//! Résumé builder form and its plain-text composition for the reviewer.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The builder caps activities at this many entries.
pub const MAX_ACTIVITIES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub gpa: String,
    pub awards: String,
    pub location: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub activity_type: String,
    pub position: String,
    pub organization: String,
    pub description: String,
    /// Grade levels the activity spans, e.g. `["9", "10"]`.
    pub grades: Vec<String>,
    pub dates: String,
    pub location: String,
}

impl Activity {
    /// Activities with no role, organization or description are left off the résumé.
    pub fn is_blank(&self) -> bool {
        self.position.is_empty() && self.organization.is_empty() && self.description.is_empty()
    }

    /// Splits the description into bullet sentences at `.`, `!` or `?` followed by whitespace.
    pub fn bullets(&self) -> Vec<&str> {
        split_sentences(&self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub student: StudentInfo,
    pub education: Education,
    pub activities: Vec<Activity>,
    pub skills: String,
    pub languages: String,
}

impl ResumeForm {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.activities.len() > MAX_ACTIVITIES {
            return Err(AppError::Validation(format!(
                "A résumé may list at most {MAX_ACTIVITIES} activities"
            )));
        }
        Ok(())
    }

    /// Flattens the form into the labeled text sent for review.
    pub fn compose(&self) -> String {
        let s = &self.student;
        let e = &self.education;
        let activities = self
            .activities
            .iter()
            .map(|a| {
                format!(
                    "- {} at {} ({}, {}): {}",
                    a.position, a.organization, a.dates, a.location, a.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nSchool: {}\nGPA: {}\nAwards: {}\nSkills: {}\nLanguages: {}\nActivities:\n{}",
            s.name, s.email, s.phone, e.school, e.gpa, e.awards, self.skills, self.languages, activities
        )
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut after_terminal = false;

    for (i, c) in text.char_indices() {
        if after_terminal && c.is_whitespace() {
            sentences.push(&text[start..i]);
            start = i;
        }
        after_terminal = matches!(c, '.' | '!' | '?');
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
