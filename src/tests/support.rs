//! Scripted storage API for driver tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::StorageApi;
use crate::cache::{CacheKind, ClearCacheResponse};
use crate::error::{FetchError, FetchResult};
use crate::types::Item;

/// Answers listing and content requests from canned responses.
///
/// Responses registered with `defer_*` are held back until the test sends
/// them through the returned channel, which lets a test choose the order in
/// which concurrent requests complete.
#[derive(Default)]
pub struct ScriptedApi {
    listings: RefCell<HashMap<String, FetchResult<Vec<Item>>>>,
    deferred_listings: RefCell<HashMap<String, oneshot::Receiver<FetchResult<Vec<Item>>>>>,
    files: RefCell<HashMap<String, FetchResult<String>>>,
    deferred_files: RefCell<HashMap<String, oneshot::Receiver<FetchResult<String>>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, path: &str, items: Vec<Item>) -> Self {
        self.listings.borrow_mut().insert(path.to_string(), Ok(items));
        self
    }

    pub fn with_listing_error(self, path: &str, error: FetchError) -> Self {
        self.listings.borrow_mut().insert(path.to_string(), Err(error));
        self
    }

    /// `file_path` is `{dir}/{name}`, exactly as sent to the download endpoint.
    pub fn with_file(self, file_path: &str, content: &str) -> Self {
        self.files.borrow_mut().insert(file_path.to_string(), Ok(content.to_string()));
        self
    }

    pub fn with_file_error(self, file_path: &str, error: FetchError) -> Self {
        self.files.borrow_mut().insert(file_path.to_string(), Err(error));
        self
    }

    pub fn defer_listing(&self, path: &str) -> oneshot::Sender<FetchResult<Vec<Item>>> {
        let (tx, rx) = oneshot::channel();
        self.deferred_listings.borrow_mut().insert(path.to_string(), rx);
        tx
    }

    pub fn defer_file(&self, file_path: &str) -> oneshot::Sender<FetchResult<String>> {
        let (tx, rx) = oneshot::channel();
        self.deferred_files.borrow_mut().insert(file_path.to_string(), rx);
        tx
    }

    /// Every request made so far, as `list:{backend}:{path}` / `read:{backend}:{file_path}`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn read_calls(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with("read:")).count()
    }
}

fn dropped() -> FetchError {
    FetchError::Transport("response dropped".to_string())
}

#[async_trait(?Send)]
impl StorageApi for ScriptedApi {
    async fn list(&self, backend: &str, path: &str) -> FetchResult<Vec<Item>> {
        self.calls.borrow_mut().push(format!("list:{}:{}", backend, path));
        let deferred = self.deferred_listings.borrow_mut().remove(path);
        if let Some(rx) = deferred {
            return rx.await.unwrap_or_else(|_| Err(dropped()));
        }
        self.listings
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Status { status: 404, body: format!("no listing for '{}'", path) }))
    }

    async fn read_text(&self, backend: &str, dir: &str, name: &str) -> FetchResult<String> {
        let file_path = format!("{}/{}", dir, name);
        self.calls.borrow_mut().push(format!("read:{}:{}", backend, file_path));
        let deferred = self.deferred_files.borrow_mut().remove(&file_path);
        if let Some(rx) = deferred {
            return rx.await.unwrap_or_else(|_| Err(dropped()));
        }
        self.files
            .borrow()
            .get(&file_path)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Status { status: 404, body: "File not found".to_string() }))
    }

    async fn clear_cache(&self, kind: CacheKind) -> FetchResult<ClearCacheResponse> {
        Ok(ClearCacheResponse { status: "success".into(), message: format!("{} cache cleared", kind) })
    }
}

/// `n` files named `file1..=n` with ascending sizes.
pub fn numbered_files(n: usize) -> Vec<Item> {
    (1..=n).map(|i| Item::file(format!("file{}", i), i as u64 * 100)).collect()
}
