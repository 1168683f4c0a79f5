//! Predicates for selecting matches before their files are fetched.
//!
//! A closed set of variants combined through explicit `All` / `Any`
//! combinators. Instance predicates look at the first instance only; a
//! record with no instances fails all of them.

use std::fmt;
use std::sync::Arc;

use super::match_record::{MatchInstance, MatchRecord};

/// Selection predicate over [`MatchRecord`]s.
#[derive(Clone)]
pub enum MatchFilter {
    /// Duration bounds in seconds (inclusive). A record without a duration
    /// fails a minimum bound and passes a maximum bound.
    Duration { min: Option<u64>, max: Option<u64> },
    /// Exact region id.
    Region(String),
    /// Case-insensitive substring of the game mode.
    GameMode(String),
    /// Exact host type.
    HostType(String),
    /// Exact map name.
    Map(String),
    /// Arbitrary caller-supplied predicate.
    Custom(Arc<dyn Fn(&MatchRecord) -> bool + Send + Sync>),
    /// Every inner filter must match (an empty list matches everything).
    All(Vec<MatchFilter>),
    /// At least one inner filter must match (an empty list matches nothing).
    Any(Vec<MatchFilter>),
}

impl MatchFilter {
    /// Wrap a closure as a [`MatchFilter::Custom`] predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&MatchRecord) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Combine with another filter using AND, flattening nested `All`s.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut filters) => {
                filters.push(other);
                Self::All(filters)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Combine with another filter using OR, flattening nested `Any`s.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Any(mut filters) => {
                filters.push(other);
                Self::Any(filters)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    /// Evaluate the filter against one record.
    #[must_use]
    pub fn matches(&self, record: &MatchRecord) -> bool {
        match self {
            Self::Duration { min, max } => {
                let duration = record.duration_seconds;
                let min_ok = min.is_none_or(|m| duration.is_some_and(|d| d >= m));
                let max_ok = max.is_none_or(|m| duration.is_none_or(|d| d <= m));
                min_ok && max_ok
            }
            Self::Region(region) => {
                instance_field(record, |i| i.region_id.as_deref()) == Some(region.as_str())
            }
            Self::GameMode(mode) => instance_field(record, |i| i.game_mode.as_deref())
                .is_some_and(|m| m.to_lowercase().contains(&mode.to_lowercase())),
            Self::HostType(host) => {
                instance_field(record, |i| i.host_type.as_deref()) == Some(host.as_str())
            }
            Self::Map(map) => instance_field(record, |i| i.map.as_deref()) == Some(map.as_str()),
            Self::Custom(f) => f(record),
            Self::All(filters) => filters.iter().all(|f| f.matches(record)),
            Self::Any(filters) => filters.iter().any(|f| f.matches(record)),
        }
    }

    /// Keep the records that match, preserving order.
    #[must_use]
    pub fn apply(&self, records: Vec<MatchRecord>) -> Vec<MatchRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Human-readable description for logs.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Duration { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => format!("duration({lo}s..={hi}s)"),
                (Some(lo), None) => format!("duration(>={lo}s)"),
                (None, Some(hi)) => format!("duration(<={hi}s)"),
                (None, None) => "duration(any)".to_string(),
            },
            Self::Region(r) => format!("region={r}"),
            Self::GameMode(m) => format!("game_mode~{m}"),
            Self::HostType(h) => format!("host_type={h}"),
            Self::Map(m) => format!("map={m}"),
            Self::Custom(_) => "custom".to_string(),
            Self::All(filters) if filters.is_empty() => "all(empty)".to_string(),
            Self::All(filters) => join(filters, " AND "),
            Self::Any(filters) if filters.is_empty() => "any(empty)".to_string(),
            Self::Any(filters) => join(filters, " OR "),
        }
    }
}

fn instance_field<'a>(
    record: &'a MatchRecord,
    field: impl Fn(&'a MatchInstance) -> Option<&'a str>,
) -> Option<&'a str> {
    record.primary_instance().and_then(field)
}

fn join(filters: &[MatchFilter], sep: &str) -> String {
    let parts: Vec<String> = filters.iter().map(MatchFilter::description).collect();
    format!("({})", parts.join(sep))
}

impl fmt::Debug for MatchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchFilter")
            .field(&self.description())
            .finish()
    }
}
