//! Session factory.
//!
//! Builds the configured storage handler once and mints one session per
//! inbound request from it.

use crate::config::{SessionBackend, SessionConfig};
use crate::error::{SessionError, SessionResult};
use crate::file_handler::FileHandler;
use crate::handler::SessionHandler;
use crate::memory_handler::MemoryHandler;
use crate::session::{Session, StoreSession};
use gantry_core::HttpRequest;
use std::sync::Arc;
use tracing::info;

/// Factory producing one [`StoreSession`] per request.
#[derive(Clone)]
pub struct SessionFactory {
    handler: Arc<dyn SessionHandler>,
    config: SessionConfig,
}

impl SessionFactory {
    /// Build a factory with the backend selected by the configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gantry_session::{SessionConfig, SessionFactory};
    ///
    /// # async fn example() -> Result<(), gantry_session::SessionError> {
    /// let factory = SessionFactory::new(SessionConfig::memory()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: SessionConfig) -> SessionResult<Self> {
        let handler: Arc<dyn SessionHandler> = match config.backend {
            SessionBackend::Memory => Arc::new(MemoryHandler::new()),
            SessionBackend::File => {
                let path = config.file_path.clone().ok_or_else(|| {
                    SessionError::Config(
                        "file backend requires a base directory".to_string(),
                    )
                })?;
                Arc::new(FileHandler::new(path).await?)
            }
        };

        info!(backend = ?config.backend, cookie = %config.cookie_name, "Initialized session factory");

        Ok(Self { handler, config })
    }

    /// Build a factory over a custom storage handler.
    pub fn with_handler(config: SessionConfig, handler: Arc<dyn SessionHandler>) -> Self {
        Self { handler, config }
    }

    /// The shared storage handler.
    pub fn handler(&self) -> Arc<dyn SessionHandler> {
        Arc::clone(&self.handler)
    }

    /// The factory configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a session for an inbound request.
    ///
    /// With `auto_start` configured, the session is started before it is
    /// returned; otherwise the caller starts it on first use.
    pub async fn create(&self, request: &HttpRequest) -> SessionResult<StoreSession> {
        let mut session =
            StoreSession::new(Arc::clone(&self.handler), self.config.clone(), request);
        if self.config.auto_start {
            session.start().await?;
        }
        Ok(session)
    }
}
