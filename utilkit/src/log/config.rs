//! Logger configuration types.

use super::LogLevel;
use serde::{Deserialize, Serialize};

/// Per-logger configuration.
///
/// Unset fields fall back to the registry defaults when a logger is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Context tag printed in every line of the logger.
    #[serde(default)]
    pub context: Option<String>,
    /// Whether console output is colored by level.
    #[serde(default)]
    pub color: Option<bool>,
}

impl LogConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the context tag.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets color output.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns a copy with unset fields taken from `defaults`.
    #[must_use]
    pub fn or(&self, defaults: &Self) -> Self {
        Self {
            context: self.context.clone().or_else(|| defaults.context.clone()),
            color: self.color.or(defaults.color),
        }
    }
}

/// Where emitted lines are written, besides the callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOutput {
    /// Print to standard output.
    #[default]
    Console,
    /// Forward each line as a `tracing` event at the matching level.
    Tracing,
    /// Only deliver lines to callbacks.
    Silent,
}

/// Registry-wide settings, typically loaded from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Minimum level to emit.
    #[serde(default)]
    pub level: LogLevel,
    /// Default context for new loggers.
    #[serde(default)]
    pub context: Option<String>,
    /// Default color setting for new loggers.
    #[serde(default)]
    pub color: Option<bool>,
    /// Output target.
    #[serde(default)]
    pub output: LogOutput,
}

impl LogSettings {
    /// Returns the logger defaults carried by these settings.
    #[must_use]
    pub fn defaults(&self) -> LogConfig {
        LogConfig {
            context: self.context.clone(),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_or_prefers_explicit_fields() {
        let defaults = LogConfig::new().with_context("app").with_color(true);
        let config = LogConfig::new().with_context("db");

        let merged = config.or(&defaults);
        assert_eq!(merged.context.as_deref(), Some("db"));
        assert_eq!(merged.color, Some(true));
    }

    #[test]
    fn test_explicit_false_color_is_kept() {
        let defaults = LogConfig::new().with_color(true);
        let merged = LogConfig::new().with_color(false).or(&defaults);
        assert_eq!(merged.color, Some(false));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: LogSettings = serde_json::from_str(r#"{"level": "Warn"}"#).unwrap();
        assert_eq!(settings.level, LogLevel::Warn);
        assert_eq!(settings.output, LogOutput::Console);
        assert_eq!(settings.defaults(), LogConfig::default());
    }

    #[test]
    fn test_settings_deserialize_full() {
        let settings: LogSettings = serde_json::from_str(
            r#"{"level": "debug", "context": "svc", "color": true, "output": "silent"}"#,
        )
        .unwrap();

        assert_eq!(settings.level, LogLevel::Debug);
        assert_eq!(settings.output, LogOutput::Silent);
        assert_eq!(
            settings.defaults(),
            LogConfig::new().with_context("svc").with_color(true)
        );
    }

    #[test]
    fn test_settings_reject_unknown_level() {
        let result = serde_json::from_str::<LogSettings>(r#"{"level": "loud"}"#);
        assert!(result.is_err());
    }
}
