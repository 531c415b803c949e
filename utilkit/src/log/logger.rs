//! Logger instances.

use super::context::{current_context, in_context, with_context};
use super::registry::LogCallback;
use super::{LogConfig, LogLevel, LogRegistry, ParseLevelError};
use crate::utils::timestamps::{format_iso8601, Timestamp};
use chrono::Utc;
use parking_lot::RwLock;
use std::fmt::{self, Write as _};
use std::future::Future;
use std::sync::Arc;
use tokio::task::futures::TaskLocalFuture;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct InstanceConfig {
    context: Option<String>,
    color: bool,
}

/// A leveled logger.
///
/// Each line has the form
/// `2024-05-01T12:00:00.000Z [INFO ] <ambient> <context> message`, where the
/// ambient tag comes from [`in_context`](super::in_context) /
/// [`with_context`](super::with_context) and the second tag is the logger's
/// own context. Either tag is omitted when unset.
///
/// Filtering uses the minimum level of the logger's [`LogRegistry`], never a
/// per-logger level.
pub struct Logger {
    registry: Arc<LogRegistry>,
    config: RwLock<InstanceConfig>,
    callback: RwLock<Option<LogCallback>>,
}

impl Logger {
    /// Creates a logger on the process-wide registry using its defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LogConfig::default())
    }

    /// Creates a logger with the given context tag.
    #[must_use]
    pub fn with_context(context: impl Into<String>) -> Self {
        Self::with_config(LogConfig::new().with_context(context))
    }

    /// Creates a logger on the process-wide registry.
    ///
    /// Fields left unset fall back to the registry defaults.
    #[must_use]
    pub fn with_config(config: LogConfig) -> Self {
        Self::attached(super::registry().clone(), config)
    }

    pub(crate) fn attached(registry: Arc<LogRegistry>, config: LogConfig) -> Self {
        let resolved = config.or(&registry.defaults());
        Self::from_parts(
            registry,
            InstanceConfig {
                context: resolved.context,
                color: resolved.color.unwrap_or(false),
            },
        )
    }

    /// A logger with no context and no color that ignores registry defaults.
    pub(crate) fn attached_plain(registry: Arc<LogRegistry>) -> Self {
        Self::from_parts(registry, InstanceConfig::default())
    }

    fn from_parts(registry: Arc<LogRegistry>, config: InstanceConfig) -> Self {
        Self {
            registry,
            config: RwLock::new(config),
            callback: RwLock::new(None),
        }
    }

    /// Returns the registry this logger belongs to.
    #[must_use]
    pub fn registry(&self) -> &Arc<LogRegistry> {
        &self.registry
    }

    /// Replaces this logger's configuration.
    ///
    /// The context is always replaced (`None` clears it); color is only
    /// changed when set.
    pub fn set_config(&self, config: LogConfig) {
        let mut current = self.config.write();
        current.context = config.context;
        if let Some(color) = config.color {
            current.color = color;
        }
    }

    /// Returns this logger's context tag.
    #[must_use]
    pub fn context(&self) -> Option<String> {
        self.config.read().context.clone()
    }

    /// Returns whether console output is colored.
    #[must_use]
    pub fn color(&self) -> bool {
        self.config.read().color
    }

    /// Sets a callback receiving every line this logger emits.
    pub fn set_log_callback<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.callback.write() = Some(Arc::new(callback));
    }

    /// Removes this logger's callback.
    pub fn clear_log_callback(&self) {
        *self.callback.write() = None;
    }

    /// Sets the minimum level of the whole registry.
    pub fn set_level(&self, level: LogLevel) {
        self.registry.set_level(level);
    }

    /// Parses and sets the minimum level of the whole registry.
    pub fn set_level_str(&self, level: &str) -> Result<(), ParseLevelError> {
        self.registry.set_level_str(level)
    }

    /// Returns the registry's minimum level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.registry.level()
    }

    /// Runs `future` with `label` as the ambient context.
    pub fn scope<F: Future>(
        &self,
        label: impl Into<String>,
        future: F,
    ) -> TaskLocalFuture<String, F> {
        in_context(label, future)
    }

    /// Runs `f` with `label` as the ambient context.
    pub fn scope_sync<R>(&self, label: impl Into<String>, f: impl FnOnce() -> R) -> R {
        with_context(label, f)
    }

    /// Logs `message` at `level`.
    ///
    /// Use the `log_*!` macros for positional formatting.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.registry.enabled(level) {
            return;
        }

        let config = self.config.read().clone();
        let line = format_line(
            &Utc::now(),
            level,
            current_context().as_deref(),
            config.context.as_deref(),
            &message,
        );

        let callback = self.callback.read().clone();
        self.registry.dispatch(level, &line, config.color, callback.as_ref());
    }

    /// Logs at TRACE.
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(LogLevel::Trace, message);
    }

    /// Logs at DEBUG.
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    /// Logs at INFO.
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    /// Logs at WARN.
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    /// Logs at ERROR.
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    /// Logs at FATAL.
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config.read();
        f.debug_struct("Logger")
            .field("context", &config.context)
            .field("color", &config.color)
            .field("level", &self.level())
            .finish()
    }
}

/// Formats one log line.
#[must_use]
pub fn format_line(
    timestamp: &Timestamp,
    level: LogLevel,
    ambient: Option<&str>,
    context: Option<&str>,
    message: &dyn fmt::Display,
) -> String {
    let mut line = format!("{} [{}]", format_iso8601(timestamp), level.label());
    for tag in [ambient, context].into_iter().flatten().filter(|t| !t.is_empty()) {
        let _ = write!(line, " <{tag}>");
    }
    let _ = write!(line, " {message}");
    line
}
