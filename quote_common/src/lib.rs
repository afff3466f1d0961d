//!
//! Common types and utilities shared by the quote manager and the feed server.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` record, matching helpers, and the default seed set.
//! - `feed` — wire format of the remote feed shared by both binaries.
//! - `keys` — storage keys, labels, and timing constants.
#![warn(missing_docs)]
pub mod error;
pub mod feed;
pub mod keys;
pub mod quote;
pub mod result;

pub use error::QuoteError;
pub use quote::Quote;
pub use result::Result;
