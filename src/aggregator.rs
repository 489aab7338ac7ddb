// src/aggregator.rs

use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};

use crate::{
    error::{AggregateError, StoreError},
    models::{AdminViewModel, FileGroup, QuizResult, UserRecord},
    store::{BlobStore, DocumentStore, OrderBy},
};

pub const USERS_COLLECTION: &str = "users";
pub const RESULTS_COLLECTION: &str = "quiz_results";
pub const RESULTS_ORDER_FIELD: &str = "timestamp";
pub const DEFAULT_UPLOADS_PREFIX: &str = "uploads";

/// Reads users, quiz results and per-user uploads and joins them into one view model.
///
/// Holds no state between runs; calling [`aggregate`](Self::aggregate) again
/// against unchanged stores yields an equal model.
#[derive(Clone)]
pub struct AdminDataAggregator {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    uploads_prefix: String,
}

impl AdminDataAggregator {
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            documents,
            blobs,
            uploads_prefix: DEFAULT_UPLOADS_PREFIX.to_string(),
        }
    }

    /// Root folder under which each user's uploads live (`{prefix}/{uid}`).
    pub fn with_uploads_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uploads_prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    /// Runs one full aggregation.
    ///
    /// * Users and results are read concurrently; either failing aborts the run.
    /// * Results keep the store's descending-timestamp order.
    /// * Every user's upload folder is listed concurrently. A failed listing
    ///   gives that user an empty file list instead of an error.
    #[tracing::instrument(name = "Aggregate admin data", skip(self))]
    pub async fn aggregate(&self) -> Result<AdminViewModel, AggregateError> {
        let (users, results) = tokio::try_join!(self.fetch_users(), self.fetch_results())?;

        let files = join_all(users.iter().map(|user| self.files_for(&user.id))).await;

        tracing::info!(
            users = users.len(),
            results = results.len(),
            files = files.iter().map(|f| f.urls.len()).sum::<usize>(),
            "Admin data loaded"
        );

        Ok(AdminViewModel::ready(users, results, files))
    }

    async fn fetch_users(&self) -> Result<Vec<UserRecord>, AggregateError> {
        let docs = self
            .documents
            .list_collection(USERS_COLLECTION)
            .await
            .map_err(AggregateError::Users)?;

        Ok(docs.into_iter().map(UserRecord::from).collect())
    }

    async fn fetch_results(&self) -> Result<Vec<QuizResult>, AggregateError> {
        let docs = self
            .documents
            .list_collection_ordered(RESULTS_COLLECTION, &OrderBy::desc(RESULTS_ORDER_FIELD))
            .await
            .map_err(AggregateError::Results)?;

        Ok(docs.into_iter().map(QuizResult::from).collect())
    }

    /// Never fails: any listing or resolution error leaves the user with no files.
    async fn files_for(&self, uid: &str) -> FileGroup {
        match self.resolve_folder(uid).await {
            Ok(urls) => FileGroup {
                uid: uid.to_string(),
                urls,
            },
            Err(StoreError::NotFound(_)) => {
                tracing::debug!("No upload folder for user {}", uid);
                FileGroup::empty(uid)
            }
            Err(e) => {
                tracing::warn!("Failed to list uploads for user {}: {}", uid, e);
                FileGroup::empty(uid)
            }
        }
    }

    async fn resolve_folder(&self, uid: &str) -> Result<Vec<String>, StoreError> {
        let folder = if self.uploads_prefix.is_empty() {
            uid.to_string()
        } else {
            format!("{}/{}", self.uploads_prefix, uid)
        };

        let items = self.blobs.list_folder(&folder).await?;
        try_join_all(items.iter().map(|item| self.blobs.resolve_url(item))).await
    }
}
