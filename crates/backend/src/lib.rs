//! Craftpage Backend - client for the hosted database/auth platform.
//!
//! Everything Craftpage persists lives behind one hosted platform that
//! exposes three HTTP surfaces:
//!
//! | Surface | Path | Used for |
//! |---------|------|----------|
//! | Auth | `/auth/v1/*` | password sign-in, sign-up, refresh, sign-out, role claims |
//! | Tables | `/rest/v1/{table}` | `site_content`, `contact_inquiries`, `user_profiles` |
//! | RPC | `/rest/v1/rpc/{name}` | `get_admin_users` |
//!
//! [`BackendClient`] wraps all three. It is cheap to clone; clones share one
//! connection pool. Requests go out with the anon key unless the client was
//! narrowed to a signed-in user ([`BackendClient::with_access_token`]) or
//! elevated to the service role ([`BackendClient::service_role`]).
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = BackendClient::new(&config)?;
//! let rows: Vec<ContentRow> = backend
//!     .from("site_content")
//!     .select("*")
//!     .order("section", Order::Asc)
//!     .fetch()
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
mod client;
mod config;
mod error;
pub mod rest;

pub use auth::{AuthUser, Session};
pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;
pub use rest::{Order, TableQuery};
