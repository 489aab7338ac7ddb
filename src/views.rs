// src/views.rs

//! Display rows for the three admin sections.

use serde::{Deserialize, Serialize};

use crate::models::{AdminViewModel, FileGroup, QuizResult, UserRecord};

pub const UID_PREVIEW_CHARS: usize = 6;
pub const QUESTION_PREVIEW_CHARS: usize = 40;
pub const NO_ROLE_LABEL: &str = "(none)";
pub const CORRECT_MARKER: &str = "correct";
pub const INCORRECT_MARKER: &str = "incorrect";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    /// Email, or the id when the profile has none.
    pub label: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub uid_preview: String,
    pub correct: bool,
    pub marker: String,
    pub question_preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSection {
    pub uid: String,
    pub links: Vec<FileLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPanelView {
    pub users: Vec<UserRow>,
    pub results: Vec<ResultRow>,
    pub files: Vec<FileSection>,
}

impl From<&AdminViewModel> for AdminPanelView {
    fn from(model: &AdminViewModel) -> Self {
        Self {
            users: model.users.iter().map(UserRow::from).collect(),
            results: model.results.iter().map(ResultRow::from).collect(),
            files: model.files.iter().map(FileSection::from).collect(),
        }
    }
}

impl From<&UserRecord> for UserRow {
    fn from(user: &UserRecord) -> Self {
        let label = user
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(user.id.as_str())
            .to_string();
        let role = user
            .role
            .as_deref()
            .filter(|role| !role.is_empty())
            .unwrap_or(NO_ROLE_LABEL)
            .to_string();

        Self {
            id: user.id.clone(),
            label,
            role,
        }
    }
}

impl From<&QuizResult> for ResultRow {
    fn from(result: &QuizResult) -> Self {
        let marker = if result.correct {
            CORRECT_MARKER
        } else {
            INCORRECT_MARKER
        };

        Self {
            uid_preview: preview(result.uid.as_deref(), UID_PREVIEW_CHARS),
            correct: result.correct,
            marker: marker.to_string(),
            question_preview: preview(result.question.as_deref(), QUESTION_PREVIEW_CHARS),
        }
    }
}

impl From<&FileGroup> for FileSection {
    fn from(group: &FileGroup) -> Self {
        Self {
            uid: group.uid.clone(),
            links: group
                .urls
                .iter()
                .map(|url| FileLink {
                    url: url.clone(),
                    name: file_name(url),
                })
                .collect(),
        }
    }
}

/// First `max_chars` characters followed by an ellipsis. Absent text gives just the ellipsis.
pub fn preview(text: Option<&str>, max_chars: usize) -> String {
    let mut out: String = text.unwrap_or_default().chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Last path segment of a URL, percent-decoded. Query and fragment are ignored.
pub fn file_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();

    urlencoding::decode(last)
        .map(|name| name.into_owned())
        .unwrap_or_else(|_| last.to_string())
}
