use std::time::{Duration, Instant};

use tracing::debug;

use crate::model::notification::{Notification, Severity};

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(4000);

/// Single-slot notification channel: a new message replaces the current one,
/// and each message expires after [`NOTIFICATION_TIMEOUT`].
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<(Notification, Instant)>,
    issued: u64,
}

impl Notifier {
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notify_at(message, severity, Instant::now());
    }

    pub fn notify_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let notification = Notification {
            message: message.into(),
            severity,
        };
        debug!(?severity, message = %notification.message, "notify");
        self.current = Some((notification, now + NOTIFICATION_TIMEOUT));
        self.issued += 1;
    }

    /// Number of notifications raised so far; repeats of the same message count.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        match &self.current {
            Some((n, expires)) if now < *expires => Some(n),
            _ => None,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
