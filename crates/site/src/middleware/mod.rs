//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. Request ID (propagate or generate `x-request-id`)
//! 3. Timeout (`REQUEST_TIMEOUT_SECONDS`)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Rate limiting on `POST /contact` only (governor)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::contact_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
