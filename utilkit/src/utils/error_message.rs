//! Human-readable messages from heterogeneous error values.

use crate::errors::{CancelledError, DeferredError, UtilkitError};
use crate::log::ParseLevelError;
use serde_json::error::Category;
use serde_json::Value;
use std::error::Error;

/// Types that can produce a message suitable for showing to a user.
pub trait ErrorMessage {
    /// Returns the message.
    fn error_message(&self) -> String;
}

/// Extracts a human-readable message from `error`.
///
/// Strings are returned as-is, errors yield their display message, and
/// schema errors from `serde_json` (wrong type, missing field, and so on) are
/// reported as validation errors. JSON values use their `message` field when
/// it is a string and are stringified otherwise.
pub fn get_error_message<E: ErrorMessage + ?Sized>(error: &E) -> String {
    error.error_message()
}

fn message_of(err: &(dyn Error + 'static)) -> String {
    match err.downcast_ref::<serde_json::Error>() {
        Some(json) => validation_message(json),
        None => err.to_string(),
    }
}

fn validation_message(err: &serde_json::Error) -> String {
    match err.classify() {
        Category::Data => format!("Validation error: {err}"),
        Category::Io | Category::Syntax | Category::Eof => err.to_string(),
    }
}

impl ErrorMessage for str {
    fn error_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMessage for String {
    fn error_message(&self) -> String {
        self.clone()
    }
}

impl ErrorMessage for dyn Error + 'static {
    fn error_message(&self) -> String {
        message_of(self)
    }
}

impl ErrorMessage for dyn Error + Send + Sync + 'static {
    fn error_message(&self) -> String {
        message_of(self)
    }
}

impl ErrorMessage for Box<dyn Error + Send + Sync + 'static> {
    fn error_message(&self) -> String {
        message_of(&**self)
    }
}

impl ErrorMessage for anyhow::Error {
    fn error_message(&self) -> String {
        message_of(&**self)
    }
}

impl ErrorMessage for serde_json::Error {
    fn error_message(&self) -> String {
        validation_message(self)
    }
}

impl ErrorMessage for Value {
    fn error_message(&self) -> String {
        match self {
            Self::String(message) => message.clone(),
            Self::Object(map) => match map.get("message") {
                Some(Self::String(message)) => message.clone(),
                _ => self.to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl<T: ErrorMessage + ?Sized> ErrorMessage for &T {
    fn error_message(&self) -> String {
        (**self).error_message()
    }
}

macro_rules! display_message {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ErrorMessage for $ty {
                fn error_message(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

display_message!(
    std::io::Error,
    CancelledError,
    DeferredError,
    ParseLevelError,
    UtilkitError,
);
