//! Session configuration.

use crate::error::{SessionError, SessionResult};
use std::path::PathBuf;

/// Session storage backend type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    /// In-process memory backend
    Memory,
    /// Filesystem backend, one file per session
    File,
}

/// Session configuration.
///
/// All cookie attributes are explicit here; nothing is read from ambient
/// runtime settings. `cookie_lifetime` is in seconds, `0` meaning a
/// session-only cookie with no `Expires` attribute.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend type
    pub backend: SessionBackend,
    /// Cookie name carrying the session identifier
    pub cookie_name: String,
    /// Cookie path attribute
    pub cookie_path: String,
    /// Cookie domain attribute
    pub cookie_domain: Option<String>,
    /// Cookie Secure flag (HTTPS only)
    pub cookie_secure: bool,
    /// Cookie HttpOnly flag
    pub cookie_http_only: bool,
    /// Cookie lifetime in seconds (0 = session-only cookie)
    pub cookie_lifetime: u64,
    /// Start sessions automatically when the factory creates them
    pub auto_start: bool,
    /// Base directory for the file backend
    pub file_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Memory,
            cookie_name: "session_id".to_string(),
            cookie_path: "/".to_string(),
            cookie_domain: None,
            cookie_secure: false,
            cookie_http_only: true,
            cookie_lifetime: 1800, // 30 minutes
            auto_start: false,
            file_path: None,
        }
    }
}

impl SessionConfig {
    /// Create a memory-backed session configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_session::SessionConfig;
    ///
    /// let config = SessionConfig::memory();
    /// ```
    pub fn memory() -> Self {
        Self {
            backend: SessionBackend::Memory,
            ..Default::default()
        }
    }

    /// Create a file-backed session configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Base directory where session files are stored
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_session::SessionConfig;
    ///
    /// let config = SessionConfig::file("/tmp/sessions").unwrap();
    /// ```
    pub fn file(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(SessionError::Config(
                "file backend requires a non-empty base directory".to_string(),
            ));
        }

        Ok(Self {
            backend: SessionBackend::File,
            file_path: Some(path),
            ..Default::default()
        })
    }

    /// Set the cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Set the cookie path.
    pub fn with_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    /// Set the cookie domain.
    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    /// Set the cookie Secure flag.
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Set the cookie HttpOnly flag.
    pub fn with_cookie_http_only(mut self, http_only: bool) -> Self {
        self.cookie_http_only = http_only;
        self
    }

    /// Set the cookie lifetime in seconds (0 = session-only cookie).
    pub fn with_cookie_lifetime(mut self, seconds: u64) -> Self {
        self.cookie_lifetime = seconds;
        self
    }

    /// Start sessions automatically on creation.
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }
}
