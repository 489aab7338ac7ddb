// src/models/quiz_result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::take_string;
use crate::store::Document;

/// A document of the `quiz_results` collection.
///
/// Results are listed as returned by the store; `uid` is not checked
/// against the users collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Id of the user who answered. May reference a user that no longer exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Absent or non-boolean values read as `false`.
    pub correct: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    /// RFC 3339 (any offset) or epoch seconds/milliseconds in the store.
    /// Values that are neither stay in `extra` under the same key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Document> for QuizResult {
    fn from(doc: Document) -> Self {
        let mut fields = doc.fields;

        let uid = take_string(&mut fields, "uid");
        let question = take_string(&mut fields, "question");
        let correct = matches!(fields.remove("correct"), Some(Value::Bool(true)));
        let timestamp = take_timestamp(&mut fields, "timestamp");

        Self {
            uid,
            correct,
            question,
            timestamp,
            extra: fields,
        }
    }
}

/// Epoch numbers at or above this are milliseconds, below it seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .ok(),
        Value::Number(n) => {
            let epoch = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            if epoch.abs() >= EPOCH_MILLIS_THRESHOLD {
                DateTime::from_timestamp_millis(epoch)
            } else {
                DateTime::from_timestamp(epoch, 0)
            }
        }
        _ => None,
    }
}

/// Lifts `key` out of `fields` when it reads as a point in time; other values are left in place.
fn take_timestamp(fields: &mut Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let value = fields.get(key)?;
    match parse_timestamp(value) {
        Some(ts) => {
            fields.remove(key);
            Some(ts)
        }
        None => {
            tracing::debug!("Keeping unparsable result timestamp as-is: {}", value);
            None
        }
    }
}
