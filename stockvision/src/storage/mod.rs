//! Storage module
//!
//! Persistence port for the history and settings stores. Values are opaque
//! text slots addressed by key; the stores decide what goes in them.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::database::SqliteStore;
use crate::error::Result;
use std::future::Future;

/// Key-value persistence port.
///
/// `get` returns `None` for a key that was never written.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Storage backend selected at startup
#[derive(Clone)]
pub enum Storage {
    File(FileStore),
    Sqlite(SqliteStore),
}

impl KeyValueStore for Storage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Storage::File(store) => store.get(key).await,
            Storage::Sqlite(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Storage::File(store) => store.set(key, value).await,
            Storage::Sqlite(store) => store.set(key, value).await,
        }
    }
}
