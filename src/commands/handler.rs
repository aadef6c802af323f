//! Prefix command handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Handlers receive the message and its argument text instead of an interaction
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// Trait for `!name args` command handlers
///
/// Each handler declares the command names it answers to and is registered
/// with a [`CommandRegistry`](super::registry::CommandRegistry).
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl PrefixCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         serenity_ctx: &Context,
///         msg: &Message,
///         args: &str,
///     ) -> Result<()> {
///         msg.channel_id.say(&serenity_ctx.http, "pong").await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait PrefixCommandHandler: Send + Sync {
    /// Lowercase command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Handle one invocation
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared services (config, reminders, movie and hockey lookups)
    /// * `serenity_ctx` - Serenity context for Discord API calls
    /// * `msg` - The message that carried the command
    /// * `args` - Text after the command name, trimmed
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
        args: &str,
    ) -> Result<()>;
}

