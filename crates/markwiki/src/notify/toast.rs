//! Non-blocking toast queue backend
//!
//! Notifications go onto an unbounded channel and the call returns at once; the
//! host drains the receiver on its own schedule.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{format_message, Acknowledgement, Level, Notifier};

/// A queued notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: Level,
    /// Full text including the level prefix
    pub text: String,
}

/// Sending half; cheap to clone
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    tx: mpsc::UnboundedSender<Toast>,
}

/// Receiving half, owned by whatever displays the toasts
#[derive(Debug)]
pub struct ToastReceiver {
    rx: mpsc::UnboundedReceiver<Toast>,
}

/// Creates a connected notifier/receiver pair
pub fn toast_channel() -> (ToastNotifier, ToastReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ToastNotifier { tx }, ToastReceiver { rx })
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: Level, message: &str) -> Acknowledgement {
        let toast = Toast {
            level,
            text: format_message(level, message),
        };
        match self.tx.send(toast) {
            Ok(()) => {
                debug!(%level, "toast queued");
                Acknowledgement::Queued
            }
            Err(_) => {
                warn!(%level, "toast receiver gone, notification dropped");
                Acknowledgement::Dropped
            }
        }
    }
}

impl ToastReceiver {
    /// Waits for the next toast; `None` once every notifier is dropped
    pub async fn next(&mut self) -> Option<Toast> {
        self.rx.recv().await
    }

    /// Takes everything currently queued without waiting
    pub fn drain(&mut self) -> Vec<Toast> {
        std::iter::from_fn(|| self.rx.try_recv().ok()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toasts_arrive_in_order() {
        let (notifier, mut receiver) = toast_channel();
        assert_eq!(notifier.success("one"), Acknowledgement::Queued);
        assert_eq!(notifier.error("two"), Acknowledgement::Queued);
        drop(notifier);

        assert_eq!(
            receiver.next().await,
            Some(Toast {
                level: Level::Success,
                text: "成功：one".to_string()
            })
        );
        assert_eq!(receiver.next().await.unwrap().text, "错误：two");
        assert_eq!(receiver.next().await, None);
    }

    #[test]
    fn test_drain_is_non_blocking() {
        let (notifier, mut receiver) = toast_channel();
        assert!(receiver.drain().is_empty());
        notifier.success("a");
        notifier.success("b");
        let texts: Vec<String> = receiver.drain().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["成功：a", "成功：b"]);
    }

    #[test]
    fn test_dropped_receiver() {
        let (notifier, receiver) = toast_channel();
        drop(receiver);
        assert_eq!(notifier.error("lost"), Acknowledgement::Dropped);
    }
}
