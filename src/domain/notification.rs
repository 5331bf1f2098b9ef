use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
    pub displayed_at: Option<Instant>,
    pub duration: Duration,
}

impl Notification {
    // Matches the auto-hide the web client used for its snackbars.
    const DEFAULT_DURATION: Duration = Duration::from_secs(4);

    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Self::DEFAULT_DURATION,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(NotificationLevel::Success, "Successfully logged in!");
        assert_eq!(n.level, NotificationLevel::Success);
        assert_eq!(n.message, "Successfully logged in!");
        assert_eq!(n.duration, Duration::from_secs(4));
    }

    #[test]
    fn test_notification_expiry() {
        let mut n = Notification::new(NotificationLevel::Info, "tick")
            .with_duration(Duration::from_nanos(1));
        n.mark_displayed();
        std::thread::sleep(Duration::from_millis(1));
        assert!(n.is_expired());
    }

    #[test]
    fn test_not_expired_before_display() {
        let n = Notification::new(NotificationLevel::Error, "oops")
            .with_duration(Duration::from_nanos(1));
        assert!(!n.is_expired());
    }
}
