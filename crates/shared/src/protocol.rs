use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scope of a store mutation; decides whether observers patch in place or rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// Initial load completed.
    Init,
    /// A single point changed in place; the view list keeps its membership.
    Patch,
    /// Structural change that keeps the active sort.
    Minor,
    /// Structural change that resets sort to its default.
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    Everything,
    Future,
    Past,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Everything, FilterKind::Future, FilterKind::Past];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Everything => "everything",
            FilterKind::Future => "future",
            FilterKind::Past => "past",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    #[default]
    Day,
    Time,
    Price,
}

impl SortKind {
    pub const ALL: [SortKind; 3] = [SortKind::Day, SortKind::Time, SortKind::Price];

    pub fn label(self) -> &'static str {
        match self {
            SortKind::Day => "day",
            SortKind::Time => "time",
            SortKind::Price => "price",
        }
    }
}

/// A sort or filter name that matches no known tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for FilterKind {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTag {
                kind: "filter",
                value: s.to_string(),
            })
    }
}

impl FromStr for SortKind {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTag {
                kind: "sort",
                value: s.to_string(),
            })
    }
}
