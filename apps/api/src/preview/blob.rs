use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::Mutex;
use uuid::Uuid;

/// Origin segment of every URL handed out by `MemoryBlobStore`.
pub const BLOB_ORIGIN: &str = "resume-preview";

/// Registry of in-memory binary objects addressed by opaque URLs.
///
/// A URL stays live from `create` until `revoke`; the owner is responsible
/// for revoking every URL it creates.
pub trait BlobStore: Send + Sync {
    fn create(&self, bytes: Bytes) -> String;
    /// Returns `false` if `url` was not live.
    fn revoke(&self, url: &str) -> bool;
    fn get(&self, url: &str) -> Option<Bytes>;
    fn live_count(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn create(&self, bytes: Bytes) -> String {
        let url = format!("blob:{BLOB_ORIGIN}/{}", Uuid::new_v4());
        self.blobs.lock().insert(url.clone(), bytes);
        url
    }

    fn revoke(&self, url: &str) -> bool {
        self.blobs.lock().remove(url).is_some()
    }

    fn get(&self, url: &str) -> Option<Bytes> {
        self.blobs.lock().get(url).cloned()
    }

    fn live_count(&self) -> usize {
        self.blobs.lock().len()
    }
}
