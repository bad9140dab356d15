//! Unread-count badges for the header.
//!
//! Counts come from a [`NotificationSource`]; the flow never writes them.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Unread counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationCounts {
    pub bookings: u32,
    pub messages: u32,
}

impl NotificationCounts {
    pub fn new(
        bookings: u32,
        messages: u32,
    ) -> Self {
        Self { bookings, messages }
    }

    pub fn badge_total(&self) -> u32 {
        self.bookings.saturating_add(self.messages)
    }

    /// Badge for booking updates; `None` hides it.
    pub fn bookings_badge(&self) -> Option<u32> {
        (self.bookings > 0).then_some(self.bookings)
    }

    /// Badge for unread messages; `None` hides it.
    pub fn messages_badge(&self) -> Option<u32> {
        (self.messages > 0).then_some(self.messages)
    }
}

pub trait NotificationSource: Send + Sync {
    /// Current unread counts.
    fn poll(&self) -> NotificationCounts;
}

/// Replays a fixed sequence of counts, one per poll, then keeps repeating
/// the last one.
#[derive(Debug)]
pub struct ScriptedNotificationFeed {
    script: Vec<NotificationCounts>,
    cursor: Mutex<usize>,
}

impl ScriptedNotificationFeed {
    pub fn new(script: Vec<NotificationCounts>) -> Self {
        Self {
            script,
            cursor: Mutex::new(0),
        }
    }
}

impl NotificationSource for ScriptedNotificationFeed {
    fn poll(&self) -> NotificationCounts {
        let Some(last) = self.script.len().checked_sub(1) else {
            return NotificationCounts::default();
        };
        let mut cursor = match self.cursor.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let counts = self.script[(*cursor).min(last)];
        if *cursor < last {
            *cursor += 1;
        }
        counts
    }
}
