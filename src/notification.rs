//! Notification System
//!
//! Short-lived toasts confirming completed record operations. Failures are
//! shown inline where they happen, so only successes are toasted.

use std::time::{Duration, Instant};

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    /// Format notification for toast display
    pub fn toast_message(&self) -> String {
        format!("✓ {}", self.message)
    }
}

/// Notification manager
pub struct NotificationManager {
    latest: Option<Notification>,
    /// Toast display duration
    pub toast_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            latest: None,
            toast_duration: Duration::from_secs(4),
        }
    }

    /// Replace the current toast
    pub fn success(&mut self, message: impl Into<String>) {
        let notification = Notification::new(message);
        tracing::debug!("Notification: {}", notification.message);
        self.latest = Some(notification);
    }

    /// Most recent notification, while it is still within the toast window
    pub fn current_toast(&self) -> Option<&Notification> {
        self.latest
            .as_ref()
            .filter(|n| n.created_at.elapsed() <= self.toast_duration)
    }

    pub fn dismiss_toast(&mut self) {
        self.latest = None;
    }
}
