use std::time::{Duration, Instant};

use crate::engine::SessionEvent;

/// How long a notification stays up if nobody dismisses it
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    SessionComplete,
    BlockComplete,
}

impl NotificationKind {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationKind::SessionComplete => "Session complete",
            NotificationKind::BlockComplete => "Block complete",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            NotificationKind::SessionComplete => "25 minutes done! Take a 5 minute break.",
            NotificationKind::BlockComplete => {
                "4 rounds done! Your goal grew by 1. Take a long break!"
            }
        }
    }
}

impl From<&SessionEvent> for NotificationKind {
    fn from(event: &SessionEvent) -> Self {
        match event {
            SessionEvent::SessionCompleted { .. } => NotificationKind::SessionComplete,
            SessionEvent::GoalBlockCompleted { .. } => NotificationKind::BlockComplete,
        }
    }
}

/// A transient popup raised when a session runs out
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, now: Instant) -> Self {
        Self {
            kind,
            shown_at: now,
        }
    }

    pub fn from_event(event: &SessionEvent, now: Instant) -> Self {
        Self::new(event.into(), now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}
