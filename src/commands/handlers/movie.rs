//! `!movie <title>`
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::PrefixCommandHandler;
use crate::core::Reply;

pub const MISSING_TITLE: &str = "Please provide a movie title to search for.";

pub struct MovieHandler;

#[async_trait]
impl PrefixCommandHandler for MovieHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["movie"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
        args: &str,
    ) -> Result<()> {
        let reply = if args.is_empty() {
            Reply::text(MISSING_TITLE)
        } else {
            info!("🎬 Movie search '{args}' by user {}", msg.author.id);
            match ctx.movies.search(msg.author.id.0, args).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Movie search for '{args}' failed: {e:#}");
                    Reply::text("Error: Could not reach the movie database. Please try again later.")
                }
            }
        };
        reply.send(&serenity_ctx.http, msg.channel_id).await
    }
}
