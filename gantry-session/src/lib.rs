//! Session storage for Gantry applications.
//!
//! A session is a request-scoped key/value record identified by a
//! cookie-carried token and persisted through a pluggable storage handler.
//! The record is loaded lazily on `start()`, mutated in memory, and written
//! back exactly once when the response is finalized with `set_cookie()`.
//!
//! # Examples
//!
//! ```no_run
//! use gantry_core::{HttpRequest, HttpResponse};
//! use gantry_session::{Session, SessionConfig, SessionFactory};
//!
//! # async fn handle(request: HttpRequest) -> Result<HttpResponse, gantry_session::SessionError> {
//! let factory = SessionFactory::new(SessionConfig::memory()).await?;
//!
//! let mut session = factory.create(&request).await?;
//! session.start().await?;
//! session.set("user", serde_json::json!("alice"))?;
//!
//! let mut response = HttpResponse::ok();
//! session.set_cookie(&mut response).await?;
//! # Ok(response)
//! # }
//! ```
//!
//! # Backends
//!
//! - [`MemoryHandler`] - in-process map, the default
//! - [`FileHandler`] - one file per session under a base directory
//! - any custom [`SessionHandler`] via [`SessionFactory::with_handler`]
//!
//! Handlers move opaque bytes only; identifier validation, cookie policy
//! and serialization live in the session layer. Concurrent requests for
//! the same identifier race at the handler: the last finalized response
//! wins.

pub mod config;
pub mod error;
pub mod factory;
pub mod file_handler;
pub mod handler;
pub mod memory_handler;
pub mod session;
pub mod state;

pub use config::{SessionBackend, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use factory::SessionFactory;
pub use file_handler::FileHandler;
pub use handler::{SessionHandler, generate_session_id};
pub use memory_handler::MemoryHandler;
pub use session::{Session, StoreSession, validate_session_id};
pub use state::{SessionLifecycle, SessionState};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{SessionBackend, SessionConfig};
    pub use crate::error::{SessionError, SessionResult};
    pub use crate::factory::SessionFactory;
    pub use crate::handler::{SessionHandler, generate_session_id};
    pub use crate::session::{Session, StoreSession};
}
