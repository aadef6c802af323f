//! `!mom`

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::PrefixCommandHandler;

pub const MOM_REPLY: &str = "what...?";

pub struct MomHandler;

#[async_trait]
impl PrefixCommandHandler for MomHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["mom"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
        _args: &str,
    ) -> Result<()> {
        msg.channel_id.say(&serenity_ctx.http, MOM_REPLY).await?;
        Ok(())
    }
}
