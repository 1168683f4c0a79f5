//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from its callers'
//! environment. They contain no implementation details beyond the trivial
//! in-process providers.

pub mod token;

pub use token::{EnvTokenProvider, StaticTokenProvider, TokenError, TokenProvider, resolve_token};
