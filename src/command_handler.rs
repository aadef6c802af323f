use anyhow::Result;
use log::{debug, error, info};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handlers::create_all_handlers;
use crate::commands::parse::parse_command;
use crate::commands::registry::CommandRegistry;
use crate::core::{Config, Reply};
use crate::features::reminders::ReminderStore;
use crate::features::triggers::{self, Triggers};

/// The command and triggers one message carries
#[derive(Debug, PartialEq, Eq)]
pub struct Dispatch<'a> {
    pub command: Option<(String, &'a str)>,
    pub triggers: Triggers,
}

impl<'a> Dispatch<'a> {
    pub fn plan(content: &'a str, prefix: &str) -> Self {
        Dispatch {
            command: parse_command(content, prefix),
            triggers: Triggers::scan(content),
        }
    }
}

/// Routes every incoming message: pending selections, then prefix commands, then triggers
#[derive(Clone)]
pub struct CommandHandler {
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        let mut names: Vec<&str> = registry.command_names().copied().collect();
        names.sort_unstable();
        info!("📋 Registered {} commands: {}", registry.len(), names.join(", "));

        CommandHandler {
            ctx: Arc::new(CommandContext::new(config)),
            registry,
        }
    }

    pub fn context(&self) -> Arc<CommandContext> {
        Arc::clone(&self.ctx)
    }

    /// Handle for the reminder scheduler
    pub fn reminders(&self) -> ReminderStore {
        self.ctx.reminders.clone()
    }

    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = msg.author.id.0;
        let content = msg.content.trim();

        info!(
            "[{}] 📥 Message received | User: {} | Channel: {} | Content: '{}'",
            request_id,
            user_id,
            msg.channel_id,
            content.chars().take(100).collect::<String>()
        );

        if let Some(reply) = self.pending_selection(user_id, content).await? {
            debug!("[{request_id}] 🔢 Pending selection answered");
            reply.send(&ctx.http, msg.channel_id).await?;
            info!("[{request_id}] ✅ Selection reply sent");
            return Ok(());
        }

        let plan = Dispatch::plan(content, self.ctx.prefix());
        let command_result = match plan.command {
            Some((name, args)) => match self.registry.get(&name) {
                Some(handler) => {
                    debug!("[{request_id}] 🎯 Dispatching command '{name}'");
                    let result = handler.handle(Arc::clone(&self.ctx), ctx, msg, args).await;
                    match &result {
                        Ok(()) => info!("[{request_id}] ✅ Command '{name}' completed"),
                        Err(e) => error!("[{request_id}] ❌ Command '{name}' failed: {e:#}"),
                    }
                    result
                }
                None => {
                    debug!("[{request_id}] Ignoring unknown command '{name}'");
                    Ok(())
                }
            },
            None => Ok(()),
        };

        // Triggers run whatever the command did
        if let Err(e) = triggers::respond(ctx, msg, &self.ctx.config, plan.triggers).await {
            error!("[{request_id}] Trigger response failed: {e:#}");
        }
        command_result
    }

    /// A numeric reply to an open movie or player list. Movie lists take precedence.
    async fn pending_selection(&self, user_id: u64, content: &str) -> Result<Option<Reply>> {
        if self.ctx.movies.has_pending(user_id) {
            if let Some(reply) = self.ctx.movies.select(user_id, content).await? {
                return Ok(Some(reply));
            }
        }
        if self.ctx.hockey.has_pending_player(user_id) {
            return Ok(self.ctx.hockey.select_player(user_id, content).await);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_message_still_fires_triggers() {
        let plan = Dispatch::plan("!movie ur mom goes to college", "!");
        assert_eq!(plan.command, Some(("movie".to_string(), "ur mom goes to college")));
        assert!(plan.triggers.mom);
        assert!(!plan.triggers.alot);
    }

    #[test]
    fn test_plain_message_has_no_command() {
        let plan = Dispatch::plan("thanks alot", "!");
        assert!(plan.command.is_none());
        assert!(plan.triggers.alot);
    }

    #[test]
    fn test_custom_prefix() {
        let plan = Dispatch::plan("?cats quote", "?");
        assert_eq!(plan.command, Some(("cats".to_string(), "quote")));
        assert!(!plan.triggers.any());
        assert!(Dispatch::plan("!cats quote", "?").command.is_none());
    }
}
