use std::{fs, io::ErrorKind, path::Path};

use anyhow::Context;
use client_core::BoardSettings;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "trip-board.toml";
const ENV_PREFIX: &str = "TRIP_BOARD__";

/// Defaults, then the settings file, then `TRIP_BOARD__*` environment overrides.
///
/// A missing default file is fine; a file named explicitly on the command line must exist.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<BoardSettings> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));

    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<BoardSettings>(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && !explicit => BoardSettings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

pub fn apply_env_overrides<F>(settings: &mut BoardSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(&format!("{ENV_PREFIX}ABORT_FEEDBACK_MS")) {
        match v.parse::<u64>() {
            Ok(parsed) => settings.abort_feedback_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid abort_feedback_ms override"),
        }
    }
    if let Some(v) = lookup(&format!("{ENV_PREFIX}SHOW_TRIP_SUMMARY")) {
        match v.parse::<bool>() {
            Ok(parsed) => settings.show_trip_summary = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid show_trip_summary override"),
        }
    }
    if let Some(v) = lookup(&format!("{ENV_PREFIX}TRIP_SUMMARY_MAX_CITIES")) {
        match v.parse::<usize>() {
            Ok(parsed) => settings.trip_summary_max_cities = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid trip_summary_max_cities override"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
