// src/store/mod.rs

//! Collaborator interfaces for the hosted backend.
//!
//! The aggregator only ever sees these traits, so production backends and
//! in-memory test doubles are interchangeable.

pub mod local;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

/// One schema-less record of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Store-side sort applied to a collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Reference to a single blob inside a folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    /// Path relative to the store root, `/`-separated.
    pub full_path: String,
    /// Last path segment.
    pub name: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document of `collection`, in the store's natural order.
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Every document of `collection`, sorted by the store.
    async fn list_collection_ordered(
        &self,
        collection: &str,
        order: &OrderBy,
    ) -> Result<Vec<Document>, StoreError>;
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Files directly inside `path`. Fails with `StoreError::NotFound` when the folder is absent.
    async fn list_folder(&self, path: &str) -> Result<Vec<FileRef>, StoreError>;

    /// A URL from which the file can be retrieved.
    async fn resolve_url(&self, file: &FileRef) -> Result<String, StoreError>;
}
