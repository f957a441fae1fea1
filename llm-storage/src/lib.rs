//! Object-storage layer for the LLM-generated documents: precomputed
//! recommendation lists, per-user analysis results, the background
//! processor's queue snapshot, and daily processing logs.

pub mod http;
pub mod keys;
pub mod memory;
mod storage;

pub use http::HttpObjectStore;
pub use memory::MemoryObjectStore;
pub use storage::LlmStorage;

use async_trait::async_trait;
use ripple_core::CoreError;

/// Raw key/value blob access to one bucket of an S3-compatible store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object body. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write an object body as `application/json`.
    async fn put(&self, key: &str, body: String) -> Result<(), CoreError>;
}
