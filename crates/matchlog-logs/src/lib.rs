//! Decoders for downloaded match logs.
//!
//! Each decoder turns a combat or chat log into serialisable rows. Lines
//! outside the grammar are skipped rather than reported.

#![deny(unused_crate_dependencies)]

mod chat;
mod combat;
mod decoder;
mod error;
mod filename;

pub use chat::{ChatLogDecoder, ChatMessage, ModerationScores, UNKNOWN_VERDICT};
pub use combat::{CombatEvent, CombatLogDecoder, RAW_PARAMS_KEY, parse_params};
pub use decoder::LogDecoder;
pub use error::{LogError, LogResult};
pub use filename::{LogFileName, LogKind};
