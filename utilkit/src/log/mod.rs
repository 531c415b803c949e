//! Leveled logging with ambient context.
//!
//! Loggers attach to a [`LogRegistry`] holding the minimum level, the
//! defaults for new loggers, an optional callback that sees every line and
//! the output target. The free functions in this module operate on the
//! process-wide registry and its global logger:
//!
//! ```rust
//! use utilkit::log::{self, LogLevel, LogOutput};
//! use utilkit::log_info;
//!
//! log::registry().set_output(LogOutput::Silent);
//! log::set_level(LogLevel::Debug);
//! log::with_context("req-7", || {
//!     log_info!("handling {} items", 3);
//! });
//! ```

mod config;
mod context;
mod level;
mod logger;
mod registry;

pub use config::{LogConfig, LogOutput, LogSettings};
pub use context::{current_context, in_context, inherit_context, with_context};
pub use level::{LogLevel, ParseLevelError};
pub use logger::{format_line, Logger};
pub use registry::{LogCallback, LogRegistry};

use std::fmt;
use std::sync::{Arc, LazyLock};

static REGISTRY: LazyLock<Arc<LogRegistry>> = LazyLock::new(LogRegistry::new);

static GLOBAL_LOGGER: LazyLock<Logger> =
    LazyLock::new(|| Logger::attached_plain(REGISTRY.clone()));

/// Returns the process-wide registry.
pub fn registry() -> &'static Arc<LogRegistry> {
    &REGISTRY
}

/// Returns the global logger.
pub fn global() -> &'static Logger {
    &GLOBAL_LOGGER
}

/// Logs `message` at `level` on the global logger.
pub fn log(level: LogLevel, message: impl fmt::Display) {
    global().log(level, message);
}

/// Logs at TRACE on the global logger.
pub fn trace(message: impl fmt::Display) {
    global().trace(message);
}

/// Logs at DEBUG on the global logger.
pub fn debug(message: impl fmt::Display) {
    global().debug(message);
}

/// Logs at INFO on the global logger.
pub fn info(message: impl fmt::Display) {
    global().info(message);
}

/// Logs at WARN on the global logger.
pub fn warn(message: impl fmt::Display) {
    global().warn(message);
}

/// Logs at ERROR on the global logger.
pub fn error(message: impl fmt::Display) {
    global().error(message);
}

/// Logs at FATAL on the global logger.
pub fn fatal(message: impl fmt::Display) {
    global().fatal(message);
}

/// Sets the process-wide minimum level.
pub fn set_level(level: LogLevel) {
    registry().set_level(level);
}

/// Parses and sets the process-wide minimum level.
pub fn set_level_str(level: &str) -> Result<(), ParseLevelError> {
    registry().set_level_str(level)
}

/// Returns the process-wide minimum level.
pub fn level() -> LogLevel {
    registry().level()
}

/// Updates the defaults used by loggers created from now on.
pub fn set_defaults(defaults: LogConfig) {
    registry().set_defaults(defaults);
}

/// Replaces the global logger's configuration.
pub fn set_global_config(config: LogConfig) {
    global().set_config(config);
}

/// Sets a callback invoked for every line from any logger on the
/// process-wide registry.
pub fn set_global_log_callback<F>(callback: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    registry().set_global_log_callback(callback);
}

/// Removes the process-wide callback.
pub fn clear_global_log_callback() {
    registry().clear_global_log_callback();
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    // The only test touching the process-wide registry; everything else uses
    // isolated registries.
    #[test]
    fn test_global_logger_round_trip() {
        registry().set_output(LogOutput::Silent);
        set_level_str("warn").unwrap();
        assert_eq!(level(), LogLevel::Warn);
        assert!(set_level_str("bogus").is_err());

        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = lines.clone();
        set_global_log_callback(move |line| sink.lock().push(line.to_string()));
        set_global_config(LogConfig::new().with_context("main"));

        let instance = Logger::with_context("worker");
        info("suppressed");
        warn("global");
        crate::log_error!("code {}", 7);
        instance.fatal("instance");
        with_context("job-1", || crate::log_at!(LogLevel::Error, "scoped"));

        {
            let lines = lines.lock();
            assert_eq!(lines.len(), 4);
            assert!(lines[0].ends_with("[WARN ] <main> global"));
            assert!(lines[1].ends_with("[ERROR] <main> code 7"));
            assert!(lines[2].ends_with("[FATAL] <worker> instance"));
            assert!(lines[3].ends_with("[ERROR] <job-1> <main> scoped"));
        }

        clear_global_log_callback();
        set_global_config(LogConfig::default());
        registry().reset();
    }
}
