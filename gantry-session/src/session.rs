//! Request-scoped session over a pluggable storage handler.
//!
//! A session is constructed per inbound request, lazily loads its record
//! from the handler on `start()`, buffers all mutation in memory and
//! writes back exactly once, when `set_cookie()` finalizes the response.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::handler::SessionHandler;
use crate::state::{SessionLifecycle, SessionState};
use async_trait::async_trait;
use gantry_core::cookie::{SetCookie, set_cookie_name};
use gantry_core::{HttpRequest, HttpResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Check an identifier taken from an inbound cookie.
///
/// Anything that is not strictly alphanumeric is treated as "no session"
/// so an attacker-supplied value can never reach a backend lookup.
pub fn validate_session_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Request-scoped key/value session.
///
/// One implementation per storage strategy; all share these semantics:
/// accessors require `start()`, identifiers are minted lazily, and
/// persistence plus cookie emission happen in `set_cookie()`.
#[async_trait]
pub trait Session: Send {
    /// Load the session record. Idempotent; a second call is a no-op.
    async fn start(&mut self) -> SessionResult<()>;

    /// Whether `start()` has run (and `destroy()` has not).
    fn is_started(&self) -> bool;

    /// Current lifecycle state.
    fn lifecycle(&self) -> SessionLifecycle;

    /// Get a value from the session record.
    fn get(&self, key: &str) -> SessionResult<Option<Value>>;

    /// Set a value in the session record.
    fn set(&mut self, key: &str, value: Value) -> SessionResult<()>;

    /// Whether a key exists in the session record.
    fn has(&self, key: &str) -> SessionResult<bool>;

    /// Remove a key, returning its previous value.
    fn remove(&mut self, key: &str) -> SessionResult<Option<Value>>;

    /// Current session identifier, minting a fresh one if none exists.
    fn id(&mut self) -> SessionResult<String>;

    /// Clear the current identifier so the next `id()` mints a fresh one.
    ///
    /// With `delete_old`, the old persisted record is destroyed first and
    /// the in-memory data cleared. Used to defeat session fixation on
    /// privilege escalation.
    async fn regenerate_id(&mut self, delete_old: bool) -> SessionResult<()>;

    /// Destroy the persisted record and mark the session destroyed.
    ///
    /// With `clear_data`, the in-memory record is cleared as well. The
    /// record reads as empty afterwards until a new `start()`.
    async fn destroy(&mut self, clear_data: bool) -> SessionResult<()>;

    /// Finalize: persist the record and emit the session cookie.
    ///
    /// If started and the record is non-empty at this moment, the blob is
    /// written under the (possibly freshly minted) identifier and a live
    /// cookie is attached. Otherwise an existing response cookie with the
    /// configured name is replaced with a clearing directive; a response
    /// without one is left untouched.
    async fn set_cookie(&mut self, response: &mut HttpResponse) -> SessionResult<()>;

    /// Configured cookie lifetime in seconds (0 = session-only cookie).
    fn cookie_lifetime(&self) -> u64;
}

/// Handler-backed session implementation.
pub struct StoreSession {
    handler: Arc<dyn SessionHandler>,
    config: SessionConfig,
    state: SessionState,
    session_id: Option<String>,
    data: HashMap<String, Value>,
    /// Cookie value captured from the inbound request at construction.
    request_cookie: Option<String>,
}

impl StoreSession {
    /// Create a session for one inbound request.
    ///
    /// The configured cookie is captured from the request here; nothing is
    /// read from the handler until `start()`.
    pub fn new(
        handler: Arc<dyn SessionHandler>,
        config: SessionConfig,
        request: &HttpRequest,
    ) -> Self {
        let request_cookie = request.cookie(&config.cookie_name);
        Self {
            handler,
            config,
            state: SessionState::new(),
            session_id: None,
            data: HashMap::new(),
            request_cookie,
        }
    }

    /// Get a value deserialized into a concrete type.
    ///
    /// Values of the wrong shape read as `None`.
    pub fn get_value<T: DeserializeOwned>(&self, key: &str) -> SessionResult<Option<T>> {
        Ok(self
            .get(key)?
            .and_then(|v| serde_json::from_value(v).ok()))
    }

    /// Set a value from any serializable type.
    pub fn set_value<T: Serialize>(&mut self, key: &str, value: T) -> SessionResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.set(key, value)
    }

    fn decode(bytes: &[u8]) -> HashMap<String, Value> {
        match serde_json::from_slice(bytes) {
            Ok(data) => data,
            Err(e) => {
                // Availability over visibility: a corrupt record reads as
                // "no session" instead of failing the request.
                debug!(error = %e, "corrupt session record, starting empty");
                HashMap::new()
            }
        }
    }

    fn encode(&self) -> SessionResult<Vec<u8>> {
        serde_json::to_vec(&self.data).map_err(|e| SessionError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl Session for StoreSession {
    async fn start(&mut self) -> SessionResult<()> {
        if self.state.is_started() {
            return Ok(());
        }

        self.session_id = None;
        self.data = HashMap::new();

        if let Some(cookie) = self.request_cookie.clone() {
            if validate_session_id(&cookie) {
                if let Some(bytes) = self.handler.read(&cookie).await? {
                    self.data = Self::decode(&bytes);
                }
                self.session_id = Some(cookie);
            } else {
                debug!("rejecting malformed session identifier from request cookie");
            }
        }

        self.state.mark_started();
        Ok(())
    }

    fn is_started(&self) -> bool {
        self.state.is_started()
    }

    fn lifecycle(&self) -> SessionLifecycle {
        self.state.lifecycle()
    }

    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        self.state.ensure_accessible()?;
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> SessionResult<()> {
        self.state.ensure_accessible()?;
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn has(&self, key: &str) -> SessionResult<bool> {
        self.state.ensure_accessible()?;
        Ok(self.data.contains_key(key))
    }

    fn remove(&mut self, key: &str) -> SessionResult<Option<Value>> {
        self.state.ensure_accessible()?;
        Ok(self.data.remove(key))
    }

    fn id(&mut self) -> SessionResult<String> {
        self.state.ensure_accessible()?;
        match self.session_id {
            Some(ref id) => Ok(id.clone()),
            None => {
                let id = self.handler.create_id();
                self.session_id = Some(id.clone());
                Ok(id)
            }
        }
    }

    async fn regenerate_id(&mut self, delete_old: bool) -> SessionResult<()> {
        if delete_old {
            if let Some(ref id) = self.session_id {
                self.handler.destroy(id).await?;
            }
            self.data.clear();
        }
        self.session_id = None;
        Ok(())
    }

    async fn destroy(&mut self, clear_data: bool) -> SessionResult<()> {
        if let Some(ref id) = self.session_id {
            self.handler.destroy(id).await?;
        }
        if clear_data {
            self.data.clear();
        }
        self.state.mark_destroyed();
        self.session_id = None;
        Ok(())
    }

    async fn set_cookie(&mut self, response: &mut HttpResponse) -> SessionResult<()> {
        if self.state.is_started() && !self.data.is_empty() {
            let id = self.id()?;
            let blob = self.encode()?;
            self.handler.write(&id, &blob).await?;

            let mut cookie = SetCookie::new(&self.config.cookie_name, &id)
                .with_path(&self.config.cookie_path)
                .with_secure(self.config.cookie_secure)
                .with_http_only(self.config.cookie_http_only);
            if let Some(ref domain) = self.config.cookie_domain {
                cookie = cookie.with_domain(domain);
            }
            if self.config.cookie_lifetime > 0 {
                cookie = cookie.with_lifetime(Duration::from_secs(self.config.cookie_lifetime));
            }

            response
                .headers
                .insert("Set-Cookie".to_string(), cookie.to_header_value());
            return Ok(());
        }

        // Not started (or destroyed, or emptied): clear an existing cookie
        // with our name, otherwise leave the response alone.
        let matches_ours = response
            .header("Set-Cookie")
            .and_then(|v| set_cookie_name(v))
            .is_some_and(|name| name == self.config.cookie_name);
        if matches_ours {
            response.headers.insert(
                "Set-Cookie".to_string(),
                SetCookie::expired(&self.config.cookie_name).to_header_value(),
            );
        }

        Ok(())
    }

    fn cookie_lifetime(&self) -> u64 {
        self.config.cookie_lifetime
    }
}
