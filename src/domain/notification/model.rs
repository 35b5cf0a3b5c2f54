//! Notification domain entity

use chrono::{DateTime, Utc};

/// Types that are never deduplicated
pub const UNDEDUPLICATED_TYPES: &[&str] = &["error", "accident"];

pub const DEFAULT_PRIORITY: &str = "NORMAL";

/// A message delivered to a staff member or a recipient group
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub notification_type: String,
    pub recipient_id: Option<i64>,
    /// `ADMIN`, `DRIVER`, `PASSENGER`, ...
    pub recipient_type: Option<String>,
    pub is_read: bool,
    pub content_hash: Option<String>,
    pub is_duplicate: bool,
    pub priority: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            message: message.into(),
            notification_type: notification_type.into(),
            recipient_id: None,
            recipient_type: None,
            is_read: false,
            content_hash: None,
            is_duplicate: false,
            priority: DEFAULT_PRIORITY.to_string(),
            timestamp: now,
            created_at: now,
        }
    }

    pub fn to_recipient(mut self, recipient_id: i64, recipient_type: impl Into<String>) -> Self {
        self.recipient_id = Some(recipient_id);
        self.recipient_type = Some(recipient_type.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Whether this type participates in duplicate suppression
    pub fn is_deduplicated(&self) -> bool {
        let kind = self.notification_type.to_lowercase();
        !UNDEDUPLICATED_TYPES.contains(&kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_and_accidents_bypass_dedup() {
        assert!(!Notification::new("x", "error").is_deduplicated());
        assert!(!Notification::new("x", "ACCIDENT").is_deduplicated());
        assert!(Notification::new("x", "info").is_deduplicated());
    }
}
