use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use urmom_bot::command_handler::CommandHandler;
use urmom_bot::core::Config;
use urmom_bot::features::hockey::PollCadence;
use urmom_bot::features::reminders::ReminderScheduler;

struct Handler {
    command_handler: Arc<CommandHandler>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Error handling message: {e}");
            if let Err(why) = msg
                .channel_id
                .say(
                    &ctx.http,
                    "Sorry, I encountered an error processing your message.",
                )
                .await
            {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting urmom-bot...");
    info!(
        "🏒 Tracking {} ({}) | Timezone: {} | Prefix: '{}'",
        config.team.name, config.team.abbrev, config.timezone, config.command_prefix
    );
    if config.omdb_api_key.is_none() {
        info!("🎬 OMDB_API_KEY not set, !movie will report a missing key");
    }

    let token = config.discord_token.clone();
    let cadence = PollCadence::from_config(&config);
    let reminder_check_interval = config.reminder_check_interval;

    let command_handler = Arc::new(CommandHandler::new(config));
    let command_ctx = command_handler.context();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler {
            command_handler: Arc::clone(&command_handler),
        })
        .await?;

    let http = Arc::clone(&client.cache_and_http.http);

    let scheduler = ReminderScheduler::new(command_handler.reminders(), reminder_check_interval);
    tokio::spawn(scheduler.run(Arc::clone(&http)));

    let live = Arc::clone(&command_ctx.live);
    let hockey = Arc::clone(&command_ctx.hockey);
    tokio::spawn(live.run(hockey, http, cadence));

    info!("🚀 Starting gateway connection...");
    if let Err(why) = client.start().await {
        error!("Client error: {why:?}");
    }

    Ok(())
}
