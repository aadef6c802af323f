//! `!cats [sub] [args]`: tracked team info, comparisons, player stats and live updates
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.3.0: Playoff bracket, series and round views
//! - 1.2.0: Player stats subcommand
//! - 1.1.0: Team comparison and live subscription subcommands
//! - 1.0.0: Overview, quote, game and recent

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::PrefixCommandHandler;
use crate::core::Reply;
use crate::features::hockey::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveAction {
    On,
    Off,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatsCommand {
    Overview,
    Quote,
    Game,
    Recent,
    /// `live` with no argument
    LiveUsage,
    Live(LiveAction),
    InvalidLive,
    Versus(String),
    Player(String),
    Bracket,
    Series,
    /// `round` alone lists every round
    Round(Option<u32>),
    InvalidRound,
    Help,
    Unknown,
}

impl CatsCommand {
    pub fn parse(args: &str) -> Self {
        let args = args.trim();
        let (sub, rest) = match args.split_once(char::is_whitespace) {
            Some((sub, rest)) => (sub.to_lowercase(), rest.trim()),
            None => (args.to_lowercase(), ""),
        };

        match sub.as_str() {
            "" => CatsCommand::Overview,
            "quote" => CatsCommand::Quote,
            "game" => CatsCommand::Game,
            "recent" => CatsCommand::Recent,
            "help" => CatsCommand::Help,
            "bracket" => CatsCommand::Bracket,
            "series" => CatsCommand::Series,
            "round" if rest.is_empty() => CatsCommand::Round(None),
            "round" => match rest.parse() {
                Ok(number) => CatsCommand::Round(Some(number)),
                Err(_) => CatsCommand::InvalidRound,
            },
            "live" => match rest.to_lowercase().as_str() {
                "" => CatsCommand::LiveUsage,
                "on" => CatsCommand::Live(LiveAction::On),
                "off" => CatsCommand::Live(LiveAction::Off),
                "status" => CatsCommand::Live(LiveAction::Status),
                _ => CatsCommand::InvalidLive,
            },
            "vs" if !rest.is_empty() => CatsCommand::Versus(rest.to_string()),
            "player" if !rest.is_empty() => CatsCommand::Player(rest.to_string()),
            _ => CatsCommand::Unknown,
        }
    }
}

pub struct CatsHandler;

impl CatsHandler {
    async fn reply_for(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        msg: &Message,
        command: CatsCommand,
    ) -> Result<Reply> {
        let hockey = &ctx.hockey;
        let team = hockey.team();
        let channel_id = msg.channel_id.0;

        Ok(match command {
            CatsCommand::Overview => {
                msg.channel_id
                    .say(&serenity_ctx.http, format!("🐾 Fetching {} info...", team.name))
                    .await?;
                hockey.overview().await?
            }
            CatsCommand::Quote => hockey.quote(),
            CatsCommand::Game => hockey.game().await?,
            CatsCommand::Recent => {
                msg.channel_id
                    .say(
                        &serenity_ctx.http,
                        format!("📊 Getting recent {} games...", team.name),
                    )
                    .await?;
                hockey.recent().await?
            }
            CatsCommand::LiveUsage => Reply::text(format::live_usage(ctx.prefix())),
            CatsCommand::Live(LiveAction::On) => {
                ctx.live.subscribe(channel_id);
                format::live_enabled_card(team, ctx.prefix()).into()
            }
            CatsCommand::Live(LiveAction::Off) => {
                ctx.live.unsubscribe(channel_id);
                format::live_disabled_card(team, ctx.prefix()).into()
            }
            CatsCommand::Live(LiveAction::Status) => {
                hockey
                    .live_status(ctx.live.is_subscribed(channel_id), ctx.live.subscriber_count())
                    .await?
            }
            CatsCommand::InvalidLive => Reply::text(format::INVALID_LIVE_OPTION),
            CatsCommand::Versus(name) => hockey.compare(&name).await?,
            CatsCommand::Player(name) => hockey.player(msg.author.id.0, &name).await?,
            CatsCommand::Bracket => hockey.bracket().await,
            CatsCommand::Series => hockey.series().await,
            CatsCommand::Round(round) => hockey.round(round).await,
            CatsCommand::InvalidRound => Reply::text(format!(
                "Please give a round number, e.g. `{}cats round 2`.",
                ctx.prefix()
            )),
            CatsCommand::Help => hockey.help(),
            CatsCommand::Unknown => Reply::text(format::unknown_subcommand(ctx.prefix())),
        })
    }
}

#[async_trait]
impl PrefixCommandHandler for CatsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["cats"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
        args: &str,
    ) -> Result<()> {
        let command = CatsCommand::parse(args);
        info!("🐾 cats {command:?} in channel {}", msg.channel_id);

        let reply = match self.reply_for(&ctx, serenity_ctx, msg, command).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("cats command failed: {e:#}");
                Reply::text("❌ Could not reach the NHL API right now. Please try again later.")
            }
        };
        reply.send(&serenity_ctx.http, msg.channel_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_subcommands() {
        assert_eq!(CatsCommand::parse(""), CatsCommand::Overview);
        assert_eq!(CatsCommand::parse("quote"), CatsCommand::Quote);
        assert_eq!(CatsCommand::parse("GAME"), CatsCommand::Game);
        assert_eq!(CatsCommand::parse("recent"), CatsCommand::Recent);
        assert_eq!(CatsCommand::parse("help"), CatsCommand::Help);
    }

    #[test]
    fn test_parse_live() {
        assert_eq!(CatsCommand::parse("live"), CatsCommand::LiveUsage);
        assert_eq!(CatsCommand::parse("live ON"), CatsCommand::Live(LiveAction::On));
        assert_eq!(CatsCommand::parse("live off"), CatsCommand::Live(LiveAction::Off));
        assert_eq!(
            CatsCommand::parse("live  status"),
            CatsCommand::Live(LiveAction::Status)
        );
        assert_eq!(CatsCommand::parse("live maybe"), CatsCommand::InvalidLive);
    }

    #[test]
    fn test_parse_arguments_keep_case() {
        assert_eq!(
            CatsCommand::parse("vs Golden Knights"),
            CatsCommand::Versus("Golden Knights".to_string())
        );
        assert_eq!(
            CatsCommand::parse("player  Matthew Tkachuk "),
            CatsCommand::Player("Matthew Tkachuk".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(CatsCommand::parse("vs"), CatsCommand::Unknown);
        assert_eq!(CatsCommand::parse("player"), CatsCommand::Unknown);
        assert_eq!(CatsCommand::parse("standings"), CatsCommand::Unknown);
    }

    #[test]
    fn test_parse_playoff_views() {
        assert_eq!(CatsCommand::parse("bracket"), CatsCommand::Bracket);
        assert_eq!(CatsCommand::parse("Series"), CatsCommand::Series);
        assert_eq!(CatsCommand::parse("round"), CatsCommand::Round(None));
        assert_eq!(CatsCommand::parse("round 3"), CatsCommand::Round(Some(3)));
        assert_eq!(CatsCommand::parse("round final"), CatsCommand::InvalidRound);
        assert_eq!(CatsCommand::parse("round -1"), CatsCommand::InvalidRound);
    }
}
