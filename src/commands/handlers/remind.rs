//! `!remind [time] [message]`
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Text command with natural time phrases and reply quoting
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, info};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::CommandContext;
use crate::commands::handler::PrefixCommandHandler;
use crate::features::reminders::{split_time_and_message, ReferencedMessage, Reminder};

/// How long to wait for the reminder text when only a time was given
pub const FOLLOW_UP_TIMEOUT: Duration = Duration::from_secs(60);

pub const FOLLOW_UP_PROMPT: &str = "What would you like to be reminded about?";
pub const FOLLOW_UP_TIMED_OUT: &str = "Reminder creation timed out.";
pub const BAD_TIME: &str = "I couldn't understand the time format. Please try again with a format like '5 minutes' or 'at 3pm'.";

pub fn usage(prefix: &str) -> String {
    format!(
        "Usage: `{p}remind [time] [message]`\n\
         Examples:\n\
         - `{p}remind 5 minutes Check the oven`\n\
         - `{p}remind 2 hours Call Mom`\n\
         - `{p}remind at 5pm Go to the gym`\n\
         - `{p}remind tomorrow at 9am Meeting with team`",
        p = prefix
    )
}

pub fn confirmation(due: &DateTime<Tz>) -> String {
    due.format("I'll remind you at %I:%M %p %Z on %b %d, %Y!")
        .to_string()
}

/// What the arguments of one `!remind` call amount to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemindPlan {
    Usage,
    BadTime,
    /// Time understood; an empty message means the user is asked for one
    Ready { due: DateTime<Tz>, message: String },
}

pub fn plan(args: &str, now: DateTime<Tz>) -> RemindPlan {
    let words: Vec<&str> = args.split_whitespace().collect();
    if words.is_empty() {
        return RemindPlan::Usage;
    }
    match split_time_and_message(&words, now) {
        Some((due, message)) => RemindPlan::Ready { due, message },
        None => RemindPlan::BadTime,
    }
}

pub struct RemindHandler;

#[async_trait]
impl PrefixCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remind"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
        args: &str,
    ) -> Result<()> {
        let http = &serenity_ctx.http;
        let now = Utc::now().with_timezone(&ctx.config.timezone);

        let (due, mut message) = match plan(args, now) {
            RemindPlan::Usage => {
                msg.channel_id.say(http, usage(ctx.prefix())).await?;
                return Ok(());
            }
            RemindPlan::BadTime => {
                debug!("Unparseable reminder time in '{args}'");
                msg.channel_id.say(http, BAD_TIME).await?;
                return Ok(());
            }
            RemindPlan::Ready { due, message } => (due, message),
        };

        if message.is_empty() {
            msg.channel_id.say(http, FOLLOW_UP_PROMPT).await?;
            let follow_up = msg
                .author
                .await_reply(serenity_ctx)
                .channel_id(msg.channel_id)
                .timeout(FOLLOW_UP_TIMEOUT)
                .await;
            match follow_up {
                Some(reply) => message = reply.content.trim().to_string(),
                None => {
                    msg.channel_id.say(http, FOLLOW_UP_TIMED_OUT).await?;
                    return Ok(());
                }
            }
        }

        let reference = msg
            .referenced_message
            .as_ref()
            .map(|original| ReferencedMessage {
                author_id: original.author.id.0,
                content: original.content.clone(),
            });

        ctx.reminders
            .add(Reminder {
                user_id: msg.author.id.0,
                channel_id: msg.channel_id.0,
                message,
                due_at: due.with_timezone(&Utc),
                reference,
            })
            .await;
        info!(
            "⏰ Reminder set by user {} for {}",
            msg.author.id,
            due.to_rfc3339()
        );

        msg.channel_id.say(http, confirmation(&due)).await?;
        Ok(())
    }
}
