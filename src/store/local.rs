// src/store/local.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use super::{BlobStore, FileRef};
use crate::error::StoreError;

/// Path prefix under which the HTTP layer serves the store root.
pub const FILES_ROUTE: &str = "files";

/// Blob store backed by a directory tree on local disk.
///
/// Folders map to directories, blobs to regular files. URLs are resolved
/// against `public_base`, e.g. `uploads/u1/a.pdf` becomes
/// `{public_base}/files/uploads/u1/a.pdf`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base: Url,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: Url) -> Self {
        Self {
            root: root.into(),
            public_base,
        }
    }

    fn resolve_dir(&self, segments: &[&str]) -> PathBuf {
        segments
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }
}

/// Splits a store path into segments, rejecting anything that could leave the root.
fn split_path(path: &str) -> Result<Vec<&str>, StoreError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments
        .iter()
        .any(|s| *s == "." || *s == ".." || s.contains('\\'))
    {
        return Err(StoreError::InvalidPath(path.to_string()));
    }

    Ok(segments)
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn list_folder(&self, path: &str) -> Result<Vec<FileRef>, StoreError> {
        let segments = split_path(path)?;
        let dir = self.resolve_dir(&segments);

        let metadata = tokio::fs::metadata(&dir).await?;
        if !metadata.is_dir() {
            return Err(StoreError::NotFound(path.to_string()));
        }

        let prefix = segments.join("/");
        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non UTF-8 file name in {}: {:?}", path, raw);
                    continue;
                }
            };

            let full_path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            files.push(FileRef { full_path, name });
        }

        // read_dir order is platform dependent
        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(files)
    }

    async fn resolve_url(&self, file: &FileRef) -> Result<String, StoreError> {
        let segments = split_path(&file.full_path)?;

        let on_disk = self.resolve_dir(&segments);
        if !tokio::fs::metadata(&on_disk).await?.is_file() {
            return Err(StoreError::NotFound(file.full_path.clone()));
        }

        let mut url = self.public_base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Backend(format!("{} cannot be a base URL", self.public_base)))?
            .pop_if_empty()
            .push(FILES_ROUTE)
            .extend(segments);

        Ok(url.to_string())
    }
}
