// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use admin_panel::{
    AdminDataAggregator, AdminPanel,
    config::Config,
    error::StoreError,
    routes,
    state::AppState,
    store::{BlobStore, Document, DocumentStore, FileRef, OrderBy, local::LocalBlobStore},
};
use async_trait::async_trait;
use axum::Router;
use serde_json::Value;

pub fn doc(id: &str, fields: Value) -> Document {
    match fields {
        Value::Object(map) => Document::new(id, map),
        other => panic!("document fields must be an object, got {}", other),
    }
}

/// In-memory document store.
///
/// Ordered listings return documents exactly as inserted, standing in for a
/// backend that already sorted them; the requested ordering is recorded.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failing: Mutex<HashSet<String>>,
    pub orderings: Mutex<Vec<(String, OrderBy)>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, collection: &str, docs: Vec<Document>) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
    }

    pub fn fail(&self, collection: &str) {
        self.failing.lock().unwrap().insert(collection.to_string());
    }

    pub fn recover(&self, collection: &str) {
        self.failing.lock().unwrap().remove(collection);
    }

    pub fn calls(&self, collection: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(collection)
            .copied()
            .unwrap_or(0)
    }

    fn read(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default() += 1;

        if self.failing.lock().unwrap().contains(collection) {
            return Err(StoreError::Backend(format!("{} is unavailable", collection)));
        }

        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.read(collection)
    }

    async fn list_collection_ordered(
        &self,
        collection: &str,
        order: &OrderBy,
    ) -> Result<Vec<Document>, StoreError> {
        self.orderings
            .lock()
            .unwrap()
            .push((collection.to_string(), order.clone()));
        self.read(collection)
    }
}

pub const BLOB_BASE: &str = "https://blobs.test";

/// In-memory blob store: folder path -> file names.
#[derive(Default)]
pub struct MemoryBlobStore {
    folders: Mutex<HashMap<String, Vec<String>>>,
    broken_folders: Mutex<HashSet<String>>,
    unresolvable: Mutex<HashSet<String>>,
    pub listings: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put(&self, folder: &str, names: &[&str]) {
        self.folders.lock().unwrap().insert(
            folder.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
    }

    /// Listing `folder` fails with a backend error instead of `NotFound`.
    pub fn break_folder(&self, folder: &str) {
        self.broken_folders.lock().unwrap().insert(folder.to_string());
    }

    /// Resolving the file at `full_path` fails.
    pub fn break_file(&self, full_path: &str) {
        self.unresolvable.lock().unwrap().insert(full_path.to_string());
    }

    pub fn url(full_path: &str) -> String {
        format!("{}/{}", BLOB_BASE, full_path)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list_folder(&self, path: &str) -> Result<Vec<FileRef>, StoreError> {
        self.listings.fetch_add(1, Ordering::SeqCst);

        if self.broken_folders.lock().unwrap().contains(path) {
            return Err(StoreError::Backend("listing timed out".to_string()));
        }

        let folders = self.folders.lock().unwrap();
        let names = folders
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;

        Ok(names
            .iter()
            .map(|name| FileRef {
                full_path: format!("{}/{}", path, name),
                name: name.clone(),
            })
            .collect())
    }

    async fn resolve_url(&self, file: &FileRef) -> Result<String, StoreError> {
        if self.unresolvable.lock().unwrap().contains(&file.full_path) {
            return Err(StoreError::NotFound(file.full_path.clone()));
        }
        Ok(Self::url(&file.full_path))
    }
}

pub fn aggregator(
    documents: &Arc<MemoryDocumentStore>,
    blobs: &Arc<MemoryBlobStore>,
) -> AdminDataAggregator {
    AdminDataAggregator::new(documents.clone(), blobs.clone())
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("admin-panel-test-{}", uuid::Uuid::new_v4()))
}

pub struct TestApp {
    pub address: String,
    pub panel: Arc<AdminPanel>,
    pub uploads_dir: PathBuf,
}

/// Builds the router over `documents` and a local blob store rooted at
/// `uploads_dir`, without binding a socket.
pub fn build_app(
    documents: Arc<MemoryDocumentStore>,
    uploads_dir: PathBuf,
    bind_addr: SocketAddr,
) -> (Router, Arc<AdminPanel>) {
    let address = format!("http://{}", bind_addr);
    let public_base_url = url::Url::parse(&address).unwrap();
    let blobs = Arc::new(LocalBlobStore::new(
        uploads_dir.clone(),
        public_base_url.clone(),
    ));
    let panel = AdminPanel::new(AdminDataAggregator::new(documents, blobs));

    let config = Config {
        database_url: "postgres://unused".to_string(),
        uploads_dir,
        public_base_url,
        bind_addr,
        cors_origins: vec![address],
        rust_log: "error".to_string(),
    };

    let state = AppState {
        panel: panel.clone(),
        config,
    };
    (routes::create_router(state), panel)
}

/// Spawns the app on a random port, backed by `documents` and a local blob
/// store rooted at `uploads_dir`.
pub async fn spawn_app(documents: Arc<MemoryDocumentStore>, uploads_dir: PathBuf) -> TestApp {
    // Bind first so blob URLs can point at the real address
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let bind_addr = listener.local_addr().unwrap();
    let address = format!("http://{}", bind_addr);

    let (app, panel) = build_app(documents, uploads_dir.clone(), bind_addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        panel,
        uploads_dir,
    }
}
