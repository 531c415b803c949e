//! Formatting macros for the logger.
//!
//! Each macro takes either a format string with positional arguments, which
//! goes to the global logger, or `logger: <expr>,` followed by the format
//! string, which goes to that logger. Arguments are only formatted when the
//! level passes the registry filter.

/// Logs at an explicit level.
#[macro_export]
macro_rules! log_at {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log::global().log($level, ::std::format_args!($($arg)+))
    };
}

/// Logs at TRACE.
#[macro_export]
macro_rules! log_trace {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::log::LogLevel::Trace, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Trace, $($arg)+)
    };
}

/// Logs at DEBUG.
#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::log::LogLevel::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Debug, $($arg)+)
    };
}

/// Logs at INFO.
#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::log::LogLevel::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Info, $($arg)+)
    };
}

/// Logs at WARN.
#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::log::LogLevel::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Warn, $($arg)+)
    };
}

/// Logs at ERROR.
#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::log::LogLevel::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Error, $($arg)+)
    };
}

/// Logs at FATAL.
#[macro_export]
macro_rules! log_fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::log::LogLevel::Fatal, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Fatal, $($arg)+)
    };
}
