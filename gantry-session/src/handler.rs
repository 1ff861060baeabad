//! Session storage backend contract.

use crate::error::SessionResult;
use async_trait::async_trait;

/// Pluggable persistence backend for raw session blobs.
///
/// The session layer owns all policy (identifier validation, cookie
/// emission, serialization); a handler only moves opaque bytes keyed by a
/// session identifier. Handlers are shared across concurrent requests, so
/// implementations must be `Send + Sync`; no read-modify-write atomicity
/// is expected of them (last write wins).
///
/// # Examples
///
/// ```ignore
/// use gantry_session::{SessionHandler, SessionResult};
/// use async_trait::async_trait;
///
/// struct NullHandler;
///
/// #[async_trait]
/// impl SessionHandler for NullHandler {
///     async fn read(&self, _id: &str) -> SessionResult<Option<Vec<u8>>> {
///         Ok(None)
///     }
///     async fn write(&self, _id: &str, _data: &[u8]) -> SessionResult<()> {
///         Ok(())
///     }
///     async fn destroy(&self, _id: &str) -> SessionResult<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait SessionHandler: Send + Sync {
    /// Read the persisted blob for an identifier.
    ///
    /// Returns `Ok(None)` when no record exists.
    async fn read(&self, id: &str) -> SessionResult<Option<Vec<u8>>>;

    /// Persist a blob under an identifier, replacing any previous record.
    async fn write(&self, id: &str, data: &[u8]) -> SessionResult<()>;

    /// Remove the record for an identifier. Missing records are not an error.
    async fn destroy(&self, id: &str) -> SessionResult<()>;

    /// Mint a fresh session identifier.
    ///
    /// Identifiers must be strictly alphanumeric so they survive the
    /// inbound cookie validation pattern on the next request.
    fn create_id(&self) -> String {
        generate_session_id()
    }
}

/// Generate a new unique session identifier.
///
/// Hex-formatted UUID v4, so the result is strictly alphanumeric.
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_alphanumeric() {
        let id = generate_session_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
