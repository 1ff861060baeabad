//! Filesystem session storage.
//!
//! One `<id>.sess` file per session under a base directory. Records
//! survive process restarts; expired-record cleanup is left to external
//! housekeeping (e.g. a tmpfiles rule).

use crate::error::{SessionError, SessionResult};
use crate::handler::SessionHandler;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// File-backed session handler.
#[derive(Debug, Clone)]
pub struct FileHandler {
    base_path: PathBuf,
}

impl FileHandler {
    /// Create a new file handler, creating the base directory if needed.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Directory where session files are stored
    pub async fn new(base_path: impl Into<PathBuf>) -> SessionResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            SessionError::Backend(format!(
                "failed to create session directory {:?}: {}",
                base_path, e
            ))
        })?;

        info!(path = ?base_path, "Initialized file session storage");

        Ok(Self { base_path })
    }

    /// Filesystem path for a session identifier.
    fn session_file(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.sess", id))
    }

    /// Reject identifiers that could escape the base directory.
    ///
    /// The session layer never forwards unvalidated identifiers, but the
    /// handler is a shared component and guards its own keyspace.
    fn check_id(id: &str) -> SessionResult<()> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SessionError::Backend(format!(
                "invalid session identifier: {:?}",
                id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionHandler for FileHandler {
    async fn read(&self, id: &str) -> SessionResult<Option<Vec<u8>>> {
        Self::check_id(id)?;
        match fs::read(self.session_file(id)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Io(e)),
        }
    }

    async fn write(&self, id: &str, data: &[u8]) -> SessionResult<()> {
        Self::check_id(id)?;
        fs::write(self.session_file(id), data).await?;
        Ok(())
    }

    async fn destroy(&self, id: &str) -> SessionResult<()> {
        Self::check_id(id)?;
        match fs::remove_file(self.session_file(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}
