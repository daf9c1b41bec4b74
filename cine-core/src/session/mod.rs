//! Key-value persistence for the session id.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use async_trait::async_trait;

/// Key under which the active session id is stored.
pub const SESSION_ID_KEY: &str = "session_id";

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
