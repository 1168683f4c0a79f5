//! Chat log decoding.
//!
//! A chat log is a header, one line per message, then a JSON object with
//! the moderation verdicts:
//!
//! ```text
//! Starting Chat log
//! Sender Id: 0A1B2C -- Is only for TeamId: 1 -- MESSAGE: gg
//! {"azureResults":[{"resultType":"Allowed","azureCategories":[{"category":"Hate","result":0}]}]}
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decoder::LogDecoder;
use crate::filename::{LogFileName, LogKind};

static MESSAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Sender Id: ([0-9A-F]+) -- Is only for TeamId: (\d+) -- MESSAGE: (.*)$")
        .expect("chat message pattern is valid")
});

static TRAILING_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("json block pattern is valid"));

const HEADER: &str = "Starting Chat log";

/// Verdict recorded when no moderation result applies to a message.
pub const UNKNOWN_VERDICT: &str = "Unknown";

/// Per-category moderation scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ModerationScores {
    pub hate: f64,
    pub selfharm: f64,
    pub sexual: f64,
    pub violence: f64,
}

impl ModerationScores {
    fn record(&mut self, category: &str, score: f64) {
        match category.to_ascii_lowercase().as_str() {
            "hate" => self.hate = score,
            "selfharm" => self.selfharm = score,
            "sexual" => self.sexual = score,
            "violence" => self.violence = score,
            _ => {}
        }
    }
}

/// One decoded chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub match_id: Option<String>,
    pub session_id: Option<String>,
    /// Position among the messages of this file.
    pub index: usize,
    pub sender_id: String,
    pub team_id: u32,
    pub message: String,
    pub verdict: String,
    #[serde(flatten)]
    pub scores: ModerationScores,
}

#[derive(Debug, Default, Deserialize)]
struct ModerationReport {
    #[serde(rename = "azureResults", default)]
    results: Vec<ModerationResult>,
}

#[derive(Debug, Deserialize)]
struct ModerationResult {
    #[serde(rename = "resultType")]
    result_type: Option<String>,
    #[serde(rename = "azureCategories", default)]
    categories: Vec<CategoryScore>,
}

#[derive(Debug, Deserialize)]
struct CategoryScore {
    #[serde(default)]
    category: String,
    #[serde(default)]
    result: f64,
}

/// Decoder for `ChatLog_*.log` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatLogDecoder;

impl ChatLogDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LogDecoder for ChatLogDecoder {
    type Row = ChatMessage;

    fn kind(&self) -> LogKind {
        LogKind::Chat
    }

    fn decode_str(&self, ids: &LogFileName, text: &str) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with(HEADER))
            .filter_map(|line| {
                let caps = MESSAGE_LINE.captures(line)?;
                Some((caps[1].to_string(), caps[2].parse::<u32>().ok()?, caps[3].to_string()))
            })
            .enumerate()
            .map(|(index, (sender_id, team_id, message))| ChatMessage {
                match_id: ids.match_id.clone(),
                session_id: ids.session_id.clone(),
                index,
                sender_id,
                team_id,
                message,
                verdict: UNKNOWN_VERDICT.to_string(),
                scores: ModerationScores::default(),
            })
            .collect();

        let report = moderation_report(text);
        // Verdicts carry no message reference; they only line up by position.
        if !messages.is_empty() && report.results.len() == messages.len() {
            for (message, result) in messages.iter_mut().zip(report.results) {
                if let Some(verdict) = result.result_type {
                    message.verdict = verdict;
                }
                for score in &result.categories {
                    message.scores.record(&score.category, score.result);
                }
            }
        }
        messages
    }
}

fn moderation_report(text: &str) -> ModerationReport {
    let Some(block) = TRAILING_JSON.find(text) else {
        return ModerationReport::default();
    };
    serde_json::from_str(block.as_str()).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable moderation block in chat log");
        ModerationReport::default()
    })
}
