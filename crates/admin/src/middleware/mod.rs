//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (one `http_request` span per request)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Request timeout
//! 5. Session layer (tower-sessions, signed cookie)
//! 6. Security headers (strict CSP, no caching)
//!
//! Authentication is not a layer: protected handlers take the
//! [`RequireAdminAuth`] extractor.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAdminAuth, RequireAdminAuth, end_admin_session, set_current_admin};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, postgres_store, remember_me, set_flash, take_flash};
