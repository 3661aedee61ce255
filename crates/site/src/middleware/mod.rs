//! HTTP middleware for the Creatorum site.
//!
//! # Layer order (outermost first)
//!
//! 1. Sentry (hub per request, HTTP transaction)
//! 2. `TraceLayer` (one span per request)
//! 3. Request ID
//! 4. Session (in-memory tower-sessions store)
//! 5. Security headers

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{AdminSession, session_keys};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
