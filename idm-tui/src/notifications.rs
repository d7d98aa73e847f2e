//! Keyed alert notifications.
//!
//! Adding an alert whose key is already shown replaces it, so repeated
//! failures of the same operation never stack.

use chrono::{DateTime, Duration, Utc};

pub const ALERT_TTL_SECS: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub key: String,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(key: impl Into<String>, level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(ALERT_TTL_SECS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Alerts {
    items: Vec<Notification>,
}

impl Alerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, level: NotificationLevel, message: impl Into<String>) {
        self.push(Notification::new(key, level, message));
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.retain(|existing| existing.key != notification.key);
        self.items.push(notification);
    }

    pub fn dismiss(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing.key != key);
        self.items.len() != before
    }

    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.items.retain(|existing| !existing.is_expired(now));
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
