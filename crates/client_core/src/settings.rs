use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// How long the failure cue stays before the presenter reverts.
    pub abort_feedback_ms: u64,
    pub show_trip_summary: bool,
    /// Routes with more cities than this collapse to `first — … — last`.
    pub trip_summary_max_cities: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            abort_feedback_ms: 600,
            show_trip_summary: true,
            trip_summary_max_cities: 3,
        }
    }
}

impl BoardSettings {
    pub fn abort_feedback(&self) -> Duration {
        Duration::from_millis(self.abort_feedback_ms)
    }
}
