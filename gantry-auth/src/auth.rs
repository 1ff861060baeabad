//! Session-backed login state.
//!
//! `Auth` wraps a started session and tracks who is logged in, plus a
//! server-side regeneration deadline that forces re-authentication before
//! the session cookie itself expires. The deadline lives inside the session
//! record, so it follows the session through whatever storage backend is
//! configured.

use crate::error::AuthResult;
use chrono::Utc;
use gantry_session::Session;
use serde_json::{Map, Value};
use tracing::debug;

/// Reserved identity field holding the regeneration deadline (epoch seconds).
pub const REGENERATE_AFTER: &str = "__regenerate_after";

/// Default session key under which the identity is stored.
pub const DEFAULT_SESSION_KEY: &str = "auth:id";

/// Upper bound on how early the regeneration deadline may land before
/// cookie expiry. The early window is 20% of the lifetime, at most this
/// many seconds, so the deadline is always strictly before the cookie's
/// own expiry and a user idling near expiry gets re-challenged while the
/// session is still alive.
const REGENERATE_EARLY_CAP_SECS: i64 = 300;

/// Compute the regeneration deadline for a login at `now`.
fn regenerate_deadline(now: i64, lifetime: i64) -> i64 {
    let early = (lifetime / 5).min(REGENERATE_EARLY_CAP_SECS);
    now + lifetime - early
}

/// Session-backed authentication state for one request.
///
/// Construction reads the identity sub-record out of the session and
/// computes whether the regeneration deadline has passed; both are fixed
/// for the lifetime of this instance. [`login`](Auth::login) and
/// [`logout`](Auth::logout) write changes back through the session.
pub struct Auth<'a, S: Session + ?Sized> {
    session: &'a mut S,
    session_key: String,
    lifetime: Option<i64>,
    identity: Map<String, Value>,
    need_regenerate: bool,
}

impl<'a, S: Session + ?Sized> Auth<'a, S> {
    /// Wrap a started session using the default session key and the
    /// session's configured cookie lifetime.
    pub fn attach(session: &'a mut S) -> AuthResult<Self> {
        Self::new(session, DEFAULT_SESSION_KEY, None)
    }

    /// Wrap a started session.
    ///
    /// # Arguments
    ///
    /// * `session_key` - Session record key under which identity is stored
    /// * `lifetime` - Seconds until forced re-authentication; `None` uses
    ///   the session's configured cookie lifetime
    ///
    /// A stored identity without a readable deadline counts as already
    /// expired, forcing regeneration on the next login.
    pub fn new(
        session: &'a mut S,
        session_key: impl Into<String>,
        lifetime: Option<i64>,
    ) -> AuthResult<Self> {
        let session_key = session_key.into();
        let stored = session.get(&session_key)?;

        let mut need_regenerate = false;
        let identity = match stored {
            Some(Value::Object(map)) if !map.is_empty() => {
                let now = Utc::now().timestamp();
                let deadline = map
                    .get(REGENERATE_AFTER)
                    .and_then(Value::as_i64)
                    .unwrap_or(now);
                need_regenerate = now >= deadline;
                map
            }
            _ => Map::new(),
        };

        Ok(Self {
            session,
            session_key,
            lifetime,
            identity,
            need_regenerate,
        })
    }

    /// The session key under which identity is stored.
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Log an identity in.
    ///
    /// Rotates the session identifier first when the previous identity's
    /// regeneration deadline had passed (defeats session fixation across
    /// re-authentication). Merges `identity` into the stored record, stamps
    /// the new regeneration deadline and writes everything back into the
    /// session.
    pub async fn login(&mut self, identity: Map<String, Value>) -> AuthResult<()> {
        if self.need_regenerate {
            debug!("regeneration deadline passed, rotating session identifier");
            self.session.regenerate_id(true).await?;
        }

        for (name, value) in identity {
            self.identity.insert(name, value);
        }

        let now = Utc::now().timestamp();
        let lifetime = self
            .lifetime
            .unwrap_or(self.session.cookie_lifetime() as i64);
        let deadline = regenerate_deadline(now, lifetime);
        self.identity
            .insert(REGENERATE_AFTER.to_string(), Value::from(deadline));
        // A non-positive lifetime leaves the deadline already passed; the
        // login still succeeds and the next construction re-challenges.
        self.need_regenerate = now >= deadline;

        self.session
            .set(&self.session_key, Value::Object(self.identity.clone()))?;
        Ok(())
    }

    /// Log out.
    ///
    /// With `destroy_session`, the whole session (identifier and persisted
    /// record) is destroyed. Otherwise only the identity sub-record is
    /// marked explicitly logged-out while other session keys survive.
    /// Either way the in-memory identity is cleared.
    pub async fn logout(&mut self, destroy_session: bool) -> AuthResult<()> {
        if destroy_session {
            self.session.destroy(true).await?;
        } else {
            self.session.set(&self.session_key, Value::Bool(false))?;
        }
        self.identity.clear();
        Ok(())
    }

    /// Whether nobody is logged in.
    pub fn is_guest(&self) -> bool {
        self.identity.is_empty()
    }

    /// Whether the caller must (re-)authenticate: guest, or the
    /// regeneration deadline had passed when this instance was built.
    pub fn is_need_login(&self) -> bool {
        self.is_guest() || self.need_regenerate
    }

    /// Get an identity field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.identity.get(field)
    }

    /// Update an existing identity field.
    ///
    /// A field that does not already exist is left untouched: ad-hoc
    /// writes cannot widen the identity, only [`login`](Auth::login) can
    /// introduce new fields.
    pub fn set(&mut self, field: &str, value: Value) {
        if let Some(slot) = self.identity.get_mut(field) {
            *slot = value;
        }
    }

    /// Whether an identity field exists.
    pub fn has(&self, field: &str) -> bool {
        self.identity.contains_key(field)
    }

    /// Remove an identity field, returning its previous value.
    pub fn unset(&mut self, field: &str) -> Option<Value> {
        self.identity.remove(field)
    }

    /// The full identity mapping (a copy; mutate through [`set`](Auth::set)).
    pub fn identity(&self) -> Map<String, Value> {
        self.identity.clone()
    }
}
