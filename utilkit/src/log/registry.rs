//! Registry-wide logger state.

use super::{LogConfig, LogLevel, LogOutput, LogSettings, Logger, ParseLevelError};
use parking_lot::RwLock;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// A callback receiving every emitted line, without color codes.
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

const TRACING_TARGET: &str = "utilkit::log";
const COLOR_RESET: &str = "\x1b[0m";

/// State shared by every [`Logger`] attached to it.
///
/// The process-wide registry is reachable through
/// [`log::registry()`](super::registry); tests create their own so that
/// level and callback changes stay isolated. Updates are last-writer-wins.
pub struct LogRegistry {
    /// Minimum level, stored as its `repr(u8)` discriminant.
    level: AtomicU8,
    /// Seeds the configuration of newly created loggers.
    defaults: RwLock<LogConfig>,
    /// Receives lines from every logger in this registry.
    callback: RwLock<Option<LogCallback>>,
    output: RwLock<LogOutput>,
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self {
            level: AtomicU8::new(LogLevel::default() as u8),
            defaults: RwLock::new(LogConfig::default()),
            callback: RwLock::new(None),
            output: RwLock::new(LogOutput::default()),
        }
    }
}

impl LogRegistry {
    /// Creates a registry with level INFO, empty defaults and console output.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a registry from settings.
    #[must_use]
    pub fn from_settings(settings: &LogSettings) -> Arc<Self> {
        let registry = Self::new();
        registry.apply_settings(settings);
        registry
    }

    /// Creates a logger attached to this registry.
    ///
    /// Fields left unset in `config` are taken from the current defaults.
    #[must_use]
    pub fn logger(self: &Arc<Self>, config: LogConfig) -> Logger {
        Logger::attached(self.clone(), config)
    }

    /// Returns the minimum level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_repr(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Sets the minimum level for every logger in this registry.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Parses and sets the minimum level.
    ///
    /// An unknown name leaves the level unchanged.
    pub fn set_level_str(&self, level: &str) -> Result<(), ParseLevelError> {
        self.set_level(level.parse()?);
        Ok(())
    }

    /// Returns true if a line at `level` would be emitted.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Returns a copy of the defaults for new loggers.
    #[must_use]
    pub fn defaults(&self) -> LogConfig {
        self.defaults.read().clone()
    }

    /// Updates the defaults for loggers created from now on.
    ///
    /// Only fields set in `defaults` are changed. Existing loggers are not
    /// affected.
    pub fn set_defaults(&self, defaults: LogConfig) {
        let mut current = self.defaults.write();
        if defaults.context.is_some() {
            current.context = defaults.context;
        }
        if defaults.color.is_some() {
            current.color = defaults.color;
        }
    }

    /// Sets a callback invoked for every line emitted by any logger here.
    pub fn set_global_log_callback<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.callback.write() = Some(Arc::new(callback));
    }

    /// Removes the registry-wide callback.
    pub fn clear_global_log_callback(&self) {
        *self.callback.write() = None;
    }

    /// Returns the output target.
    #[must_use]
    pub fn output(&self) -> LogOutput {
        *self.output.read()
    }

    /// Sets the output target.
    pub fn set_output(&self, output: LogOutput) {
        *self.output.write() = output;
    }

    /// Applies level, defaults and output from `settings`.
    pub fn apply_settings(&self, settings: &LogSettings) {
        self.set_level(settings.level);
        self.set_defaults(settings.defaults());
        self.set_output(settings.output);
    }

    /// Restores the initial state: level INFO, no defaults, no callback,
    /// console output.
    pub fn reset(&self) {
        self.set_level(LogLevel::default());
        *self.defaults.write() = LogConfig::default();
        self.clear_global_log_callback();
        self.set_output(LogOutput::default());
    }

    /// Writes a formatted line to the output target, then relays it to the
    /// logger's own callback and the global callback, in that order.
    pub(crate) fn dispatch(
        &self,
        level: LogLevel,
        line: &str,
        color: bool,
        local: Option<&LogCallback>,
    ) {
        match self.output() {
            LogOutput::Console => {
                write_console(&mut std::io::stdout().lock(), level, line, color);
            }
            LogOutput::Tracing => forward_to_tracing(level, line),
            LogOutput::Silent => {}
        }

        if let Some(local) = local {
            local(line);
        }

        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            callback(line);
        }
    }
}

impl std::fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRegistry")
            .field("level", &self.level())
            .field("defaults", &self.defaults())
            .field("output", &self.output())
            .field("callback", &self.callback.read().is_some())
            .finish()
    }
}

/// Writes one line to `out`. Write errors such as a closed pipe are dropped.
fn write_console(out: &mut impl Write, level: LogLevel, line: &str, color: bool) {
    let _ = if color {
        writeln!(out, "{}{line}{COLOR_RESET}", level.color())
    } else {
        writeln!(out, "{line}")
    };
}

fn forward_to_tracing(level: LogLevel, line: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(target: TRACING_TARGET, "{}", line),
        LogLevel::Debug => tracing::debug!(target: TRACING_TARGET, "{}", line),
        LogLevel::Info => tracing::info!(target: TRACING_TARGET, "{}", line),
        LogLevel::Warn => tracing::warn!(target: TRACING_TARGET, "{}", line),
        LogLevel::Error => tracing::error!(target: TRACING_TARGET, "{}", line),
        LogLevel::Fatal => tracing::error!(target: TRACING_TARGET, fatal = true, "{}", line),
    }
}
