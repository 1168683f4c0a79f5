//! Combat log decoding.
//!
//! ```text
//! Starting Combat log
//! [2024.05.01-18.02.11:532] [1042:Hero_Ymir] DamageDealt(amount=120, target=7): Frost Breath
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::decoder::LogDecoder;
use crate::filename::{LogFileName, LogKind};

static EVENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\] \[(\d+):([^\]]+)\] (\w+)(?:\((.*)\))?: (.*)$")
        .expect("combat event pattern is valid")
});

const HEADER: &str = "Starting Combat log";

/// Key used for parameters that are not `key=value` pairs.
pub const RAW_PARAMS_KEY: &str = "raw_params";

/// One decoded combat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatEvent {
    pub match_id: Option<String>,
    pub session_id: Option<String>,
    /// Zero-based line number in the file.
    pub line: usize,
    pub timestamp: String,
    pub entity_id: String,
    pub entity_name: String,
    pub event_type: String,
    pub params: BTreeMap<String, String>,
    pub details: String,
}

/// Decoder for `CombatLog_*.log` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatLogDecoder;

impl CombatLogDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LogDecoder for CombatLogDecoder {
    type Row = CombatEvent;

    fn kind(&self) -> LogKind {
        LogKind::Combat
    }

    fn decode_str(&self, ids: &LogFileName, text: &str) -> Vec<CombatEvent> {
        text.lines()
            .enumerate()
            .filter_map(|(line, raw)| {
                let raw = raw.trim();
                if raw.starts_with(HEADER) {
                    return None;
                }
                let caps = EVENT_LINE.captures(raw)?;
                Some(CombatEvent {
                    match_id: ids.match_id.clone(),
                    session_id: ids.session_id.clone(),
                    line,
                    timestamp: caps[1].to_string(),
                    entity_id: caps[2].to_string(),
                    entity_name: caps[3].to_string(),
                    event_type: caps[4].to_string(),
                    params: parse_params(caps.get(5).map_or("", |m| m.as_str())),
                    details: caps[6].to_string(),
                })
            })
            .collect()
    }
}

/// Split `a=1, b=2` into pairs. Text without any `=` is kept whole under
/// [`RAW_PARAMS_KEY`]; segments without `=` are dropped.
#[must_use]
pub fn parse_params(params: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if params.is_empty() {
        return out;
    }
    if !params.contains('=') {
        out.insert(RAW_PARAMS_KEY.to_string(), params.to_string());
        return out;
    }
    for pair in params.split(',') {
        if let Some((key, value)) = pair.split_once('=') {
            out.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    out
}
