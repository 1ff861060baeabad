// Gantry - session management and session-backed authentication for HTTP services
//
// This library glues three pieces together: HTTP/cookie primitives with a
// controller invocation adapter (gantry-core), request-scoped sessions over
// pluggable storage (gantry-session), and login-state tracking with
// expiry-driven re-authentication (gantry-auth).

// Re-export core functionality
pub use gantry_core::*;

// Re-export member crates
pub use gantry_auth;
pub use gantry_session;
