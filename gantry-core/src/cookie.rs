//! Cookie primitives.
//!
//! Parsing for the inbound `Cookie` header and a builder for outbound
//! `Set-Cookie` header values. Attribute rendering follows RFC 6265;
//! values are emitted verbatim, so callers must supply token-safe values.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Parse a `Cookie` request header into name/value pairs.
///
/// Malformed fragments (no `=`, empty name) are skipped rather than
/// reported; an inbound cookie header is untrusted input.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for pair in header.split(';') {
        let pair = pair.trim();
        if let Some((name, value)) = pair.split_once('=') {
            if !name.is_empty() {
                cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
    cookies
}

/// Extract the cookie name from a `Set-Cookie` header value.
pub fn set_cookie_name(header_value: &str) -> Option<&str> {
    let first = header_value.split(';').next()?;
    let (name, _) = first.split_once('=')?;
    let name = name.trim();
    if name.is_empty() { None } else { Some(name) }
}

/// Builder for a `Set-Cookie` header value.
#[derive(Debug, Clone)]
pub struct SetCookie {
    name: String,
    value: String,
    path: Option<String>,
    domain: Option<String>,
    secure: bool,
    http_only: bool,
    expires: Option<SystemTime>,
    max_age: Option<i64>,
}

impl SetCookie {
    /// Create a new cookie with the given name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
            secure: false,
            http_only: false,
            expires: None,
            max_age: None,
        }
    }

    /// Create a clearing directive for the given cookie name.
    ///
    /// Renders an empty value with an epoch `Expires` and `Max-Age=0`,
    /// instructing the client to drop the cookie.
    pub fn expired(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            path: None,
            domain: None,
            secure: false,
            http_only: false,
            expires: Some(UNIX_EPOCH),
            max_age: Some(0),
        }
    }

    /// Set the cookie path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the cookie domain
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the Secure flag (HTTPS only)
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the HttpOnly flag
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set an absolute expiry timestamp
    pub fn with_expires(mut self, expires: SystemTime) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Set an expiry relative to now
    pub fn with_lifetime(self, lifetime: Duration) -> Self {
        let expires = SystemTime::now() + lifetime;
        self.with_expires(expires)
    }

    /// Render the `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);

        if let Some(ref path) = self.path {
            header.push_str(&format!("; Path={}", path));
        }

        if let Some(ref domain) = self.domain {
            header.push_str(&format!("; Domain={}", domain));
        }

        if let Some(expires) = self.expires {
            header.push_str(&format!("; Expires={}", httpdate::fmt_http_date(expires)));
        }

        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={}", max_age));
        }

        if self.secure {
            header.push_str("; Secure");
        }

        if self.http_only {
            header.push_str("; HttpOnly");
        }

        header
    }
}
