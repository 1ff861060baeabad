//! In-process memory session storage.
//!
//! Suitable for single-node deployments and tests; records do not survive
//! a process restart.

use crate::error::SessionResult;
use crate::handler::SessionHandler;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Memory-backed session handler.
///
/// Cloning shares the underlying map, so one handler can serve every
/// request of a process.
#[derive(Clone, Default)]
pub struct MemoryHandler {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Whether a record exists for the identifier.
    pub async fn contains(&self, id: &str) -> bool {
        self.entries.lock().await.contains_key(id)
    }
}

#[async_trait]
impl SessionHandler for MemoryHandler {
    async fn read(&self, id: &str) -> SessionResult<Option<Vec<u8>>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(id).cloned())
    }

    async fn write(&self, id: &str, data: &[u8]) -> SessionResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(id.to_string(), data.to_vec());
        Ok(())
    }

    async fn destroy(&self, id: &str) -> SessionResult<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_round_trip() {
        let handler = MemoryHandler::new();
        handler.write("abc", b"payload").await.unwrap();

        assert_eq!(handler.read("abc").await.unwrap(), Some(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn test_read_missing_returns_none() {
        let handler = MemoryHandler::new();
        assert_eq!(handler.read("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_replaces_previous_record() {
        let handler = MemoryHandler::new();
        handler.write("abc", b"first").await.unwrap();
        handler.write("abc", b"second").await.unwrap();

        assert_eq!(handler.read("abc").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(handler.len().await, 1);
    }

    #[tokio::test]
    async fn test_destroy_removes_record() {
        let handler = MemoryHandler::new();
        handler.write("abc", b"payload").await.unwrap();
        handler.destroy("abc").await.unwrap();

        assert_eq!(handler.read("abc").await.unwrap(), None);
        assert!(handler.is_empty().await);
    }

    #[tokio::test]
    async fn test_destroy_missing_is_not_an_error() {
        let handler = MemoryHandler::new();
        assert!(handler.destroy("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_clone_shares_storage() {
        let handler = MemoryHandler::new();
        let other = handler.clone();
        handler.write("abc", b"shared").await.unwrap();

        assert!(other.contains("abc").await);
    }
}
