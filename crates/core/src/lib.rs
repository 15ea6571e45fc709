//! Craftpage Core - Shared domain types.
//!
//! This crate provides the types used across all Craftpage components:
//! - `site` - Public landing page and contact form
//! - `admin` - Back-office (content editor, inquiry inbox, user roles)
//! - `cli` - Operator commands (session migrations, content seeding)
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. Persistence lives behind the hosted backend and is reached
//! through `craftpage-backend`.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, and status enums
//! - [`content`] - The closed set of editable landing-page slots
//! - [`inquiry`] - Contact inquiries and their status workflow
//! - [`auth`] - Sign-in/sign-up validation and localized auth messages
//! - [`locale`] - ko-KR date formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod content;
pub mod inquiry;
pub mod locale;
pub mod types;

pub use types::*;
