//! In-memory reminder list, ordered by due time

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::response::{truncate_for_message, truncate_to};
use crate::core::mention;

/// Longest quote carried into a reminder announcement
pub const QUOTE_LIMIT: usize = 1000;

/// The message a reminder was set in reply to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedMessage {
    pub author_id: u64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub user_id: u64,
    pub channel_id: u64,
    pub message: String,
    pub due_at: DateTime<Utc>,
    pub reference: Option<ReferencedMessage>,
}

impl Reminder {
    /// Text posted when the reminder fires, cut to fit one Discord message
    pub fn announcement(&self) -> String {
        let user = mention(self.user_id);
        let text = match &self.reference {
            Some(reference) => format!(
                "{user}, you asked to be reminded about this message from {}:\n\n> {}\n\n{}",
                mention(reference.author_id),
                truncate_to(&reference.content, QUOTE_LIMIT),
                self.message
            ),
            None => format!("{user}, you asked me to remind you: {}", self.message),
        };
        truncate_for_message(&text)
    }
}

/// Shared reminder list. Clones share the same list.
#[derive(Clone, Default)]
pub struct ReminderStore {
    reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, reminder: Reminder) {
        let mut reminders = self.reminders.lock().await;
        // Insert after any reminder due at the same instant
        let index = reminders.partition_point(|r| r.due_at <= reminder.due_at);
        reminders.insert(index, reminder);
    }

    /// Remove and return every reminder due at or before `now`, earliest first
    pub async fn take_due(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut reminders = self.reminders.lock().await;
        let split = reminders.partition_point(|r| r.due_at <= now);
        reminders.drain(..split).collect()
    }

    /// Reminders still waiting
    pub async fn len(&self) -> usize {
        self.reminders.lock().await.len()
    }
}
