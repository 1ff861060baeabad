//! Session-backed authentication for Gantry.
//!
//! Builds login/logout and forced re-authentication on top of the
//! [`gantry_session::Session`] key/value contract, independent of how the
//! session is persisted.
//!
//! # Examples
//!
//! ```no_run
//! use gantry_auth::Auth;
//! use gantry_session::{Session, SessionConfig, SessionFactory};
//! use serde_json::json;
//!
//! # async fn handle(request: gantry_core::HttpRequest) -> gantry_auth::AuthResult<()> {
//! # let factory = SessionFactory::new(SessionConfig::memory()).await?;
//! let mut session = factory.create(&request).await?;
//! session.start().await?;
//!
//! let mut auth = Auth::attach(&mut session)?;
//! if auth.is_need_login() {
//!     let identity = json!({"user_id": 42, "name": "alice"});
//!     if let serde_json::Value::Object(map) = identity {
//!         auth.login(map).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;

pub use auth::{Auth, DEFAULT_SESSION_KEY, REGENERATE_AFTER};
pub use error::{AuthError, AuthResult};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::auth::{Auth, DEFAULT_SESSION_KEY, REGENERATE_AFTER};
    pub use crate::error::{AuthError, AuthResult};
}
