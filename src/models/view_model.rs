// src/models/view_model.rs

use serde::{Deserialize, Serialize};

use super::{quiz_result::QuizResult, user::UserRecord};

/// Uploaded files of one user, as resolved URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroup {
    pub uid: String,
    pub urls: Vec<String>,
}

impl FileGroup {
    pub fn empty(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            urls: Vec::new(),
        }
    }
}

/// Everything the admin screen shows, in one aggregate.
///
/// `files` holds exactly one entry per user, in the same order as `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminViewModel {
    pub users: Vec<UserRecord>,
    pub results: Vec<QuizResult>,
    pub files: Vec<FileGroup>,
    pub loading: bool,
}

impl AdminViewModel {
    pub fn ready(users: Vec<UserRecord>, results: Vec<QuizResult>, files: Vec<FileGroup>) -> Self {
        Self {
            users,
            results,
            files,
            loading: false,
        }
    }
}
