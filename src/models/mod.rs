// src/models/mod.rs

pub mod quiz_result;
pub mod user;
pub mod view_model;

pub use quiz_result::QuizResult;
pub use user::UserRecord;
pub use view_model::{AdminViewModel, FileGroup};
