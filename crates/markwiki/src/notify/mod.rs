//! User notifications
//!
//! Callers report outcomes through [`Notifier`]; the backend decides whether that
//! blocks on a dialog or lands in a toast queue.

pub mod dialog;
pub mod toast;

use std::fmt;

use serde::Serialize;

pub use dialog::{Dialog, DialogNotifier, StdioDialog, TerminalDialog};
pub use toast::{toast_channel, Toast, ToastNotifier, ToastReceiver};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    /// Localized prefix shown before the message
    pub fn prefix(self) -> &'static str {
        match self {
            Level::Success => "成功：",
            Level::Error => "错误：",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Success => f.write_str("success"),
            Level::Error => f.write_str("error"),
        }
    }
}

/// What the backend did with a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// The user dismissed it; the call blocked until then
    Dismissed,
    /// It was queued for asynchronous display
    Queued,
    /// The backend could not present it
    Dropped,
}

/// Text actually displayed: prefix followed by the caller's text, untouched
///
/// ```
/// use markwiki::notify::{format_message, Level};
///
/// assert_eq!(format_message(Level::Success, "已保存"), "成功：已保存");
/// assert_eq!(format_message(Level::Error, " x "), "错误： x ");
/// ```
pub fn format_message(level: Level, text: &str) -> String {
    format!("{}{}", level.prefix(), text)
}

/// A notification surface
pub trait Notifier {
    fn notify(&self, level: Level, message: &str) -> Acknowledgement;

    fn success(&self, text: &str) -> Acknowledgement {
        self.notify(Level::Success, text)
    }

    fn error(&self, text: &str) -> Acknowledgement {
        self.notify(Level::Error, text)
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, level: Level, message: &str) -> Acknowledgement {
        (**self).notify(level, message)
    }
}
