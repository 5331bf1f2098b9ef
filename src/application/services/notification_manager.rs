use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// Queue of transient notifications; one is shown at a time and drops off
/// once its display duration elapses.
#[derive(Debug, Default)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    duration_override: Option<Duration>,
}

impl NotificationManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the display duration for all queued notifications.
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            duration_override: Some(duration),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let mut notification = Notification::new(level, message);
        if let Some(duration) = self.duration_override {
            notification = notification.with_duration(duration);
        }
        self.queue.push_back(notification);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_notification_flow() {
        let mut manager = NotificationManager::new();

        manager.success("Successfully logged in!");
        assert!(manager.current().is_some());

        manager.tick();
        assert!(manager.current().is_some());
    }

    #[test]
    fn test_queue_advances_after_expiry() {
        let mut manager = NotificationManager::new();
        manager.info("first");
        manager.info("second");

        assert_eq!(manager.current().unwrap().message, "first");

        manager.tick();
        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());
        manager.tick();

        assert_eq!(manager.current().unwrap().message, "second");
        assert!(manager.current().unwrap().displayed_at.is_some());
    }

    #[test]
    fn test_duration_override() {
        let mut manager = NotificationManager::with_duration(Duration::from_secs(1));
        manager.error("oops");

        assert_eq!(manager.current().unwrap().duration, Duration::from_secs(1));
    }
}
