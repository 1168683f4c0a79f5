//! Domain types for match file discovery.
//!
//! Everything here is a plain value: constructed fresh on every listing,
//! never persisted, and cheap to clone.

mod category;
mod descriptor;
mod file_type;
mod match_filter;
mod match_record;
mod naming;

pub use category::{CategorySelection, FriendlyCategory};
pub use descriptor::FileDescriptor;
pub use file_type::{
    Endpoint, FileType, SESSION_PREFIXES, classify, endpoints_for, extract_session_id,
};
pub use match_filter::MatchFilter;
pub use match_record::{MatchInstance, MatchRecord, MatchSession};
pub use naming::NamingScheme;
