//! Background task that delivers due reminders

use chrono::Utc;
use log::{debug, error, info};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use std::time::Duration;

use super::store::{Reminder, ReminderStore};

pub struct ReminderScheduler {
    store: ReminderStore,
    check_interval: Duration,
}

impl ReminderScheduler {
    pub fn new(store: ReminderStore, check_interval: Duration) -> Self {
        Self {
            store,
            check_interval,
        }
    }

    /// Poll forever, sending due reminders every `check_interval`
    pub async fn run(self, http: Arc<Http>) {
        info!(
            "⏰ Reminder scheduler started (checking every {}s)",
            self.check_interval.as_secs()
        );
        let mut interval = tokio::time::interval(self.check_interval);
        loop {
            interval.tick().await;
            self.check_once(&http).await;
        }
    }

    /// Deliver everything due now. Reminders are removed before sending, so a failed send is not retried.
    pub async fn check_once(&self, http: &Http) {
        let due = self.store.take_due(Utc::now()).await;
        if due.is_empty() {
            return;
        }
        debug!(
            "⏰ {} reminder(s) due, {} still pending",
            due.len(),
            self.store.len().await
        );
        for reminder in due {
            if let Err(e) = Self::deliver(http, &reminder).await {
                error!(
                    "Failed to send reminder for user {} in channel {}: {e}",
                    reminder.user_id, reminder.channel_id
                );
            }
        }
    }

    async fn deliver(http: &Http, reminder: &Reminder) -> anyhow::Result<()> {
        ChannelId(reminder.channel_id)
            .say(http, reminder.announcement())
            .await?;
        info!(
            "🔔 Delivered reminder for user {} in channel {}",
            reminder.user_id, reminder.channel_id
        );
        Ok(())
    }
}
