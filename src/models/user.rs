// src/models/user.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::Document;

/// A document of the `users` collection.
///
/// Only `email` and `role` are interpreted; every other profile field is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned document id.
    pub id: String,

    /// Contact address, when the profile carries one as a string.
    /// Any other value stays in `extra` under the same key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Free-form role label ('admin', 'user', ...). Not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Document> for UserRecord {
    fn from(doc: Document) -> Self {
        let mut fields = doc.fields;
        let email = take_string(&mut fields, "email");
        let role = take_string(&mut fields, "role");
        // a stray "id" field would collide with the document id on serialization
        fields.remove("id");

        Self {
            id: doc.id,
            email,
            role,
            extra: fields,
        }
    }
}

/// Lifts `key` out of `fields` when it holds a string; other values are left in place.
pub(crate) fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(_)) => match fields.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        Some(other) => {
            tracing::debug!("Keeping non-string '{}' field as-is: {}", key, other);
            None
        }
        None => None,
    }
}
