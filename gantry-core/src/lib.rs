// Gantry core - HTTP types, cookie primitives and controller invocation

pub mod controller;
pub mod cookie;
pub mod error;
pub mod http;

pub use controller::{Controller, InitOutcome, invoke};
pub use cookie::{SetCookie, parse_cookie_header, set_cookie_name};
pub use error::Error;
pub use http::{HttpRequest, HttpResponse};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::controller::{Controller, InitOutcome, invoke};
    pub use crate::cookie::{SetCookie, parse_cookie_header, set_cookie_name};
    pub use crate::error::Error;
    pub use crate::http::{HttpRequest, HttpResponse};
}
