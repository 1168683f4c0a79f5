//! Core domain types and port definitions for matchlog.
//!
//! This crate knows what a match file *is*: how a remote filename maps to a
//! [`FileType`], which storage [`Endpoint`] is expected to hold it, how a
//! listing is narrowed down, and how a downloaded file is named on disk.
//! It performs no network or filesystem I/O; the HTTP adapter lives in
//! `matchlog-api` and the transfer machinery in `matchlog-download`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod filter;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    CategorySelection, Endpoint, FileDescriptor, FileType, FriendlyCategory, MatchFilter,
    MatchInstance, MatchRecord, MatchSession, NamingScheme, SESSION_PREFIXES, classify,
    endpoints_for, extract_session_id,
};
pub use error::{RetrievalError, RetrievalResult};
pub use filter::{FileFilter, FilePredicate, by_category, by_session, by_type};
pub use ports::{
    EnvTokenProvider, StaticTokenProvider, TokenError, TokenProvider, resolve_token,
};

#[cfg(test)]
use tokio as _;
