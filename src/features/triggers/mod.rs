//! # Feature: Keyword Triggers
//!
//! Reacts to "ur mom" / "your mom" with a GIF and to "alot" by spelling it out in reactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

use log::{debug, warn};
use serenity::model::channel::{Message, ReactionType};
use serenity::prelude::Context;
use std::path::Path;

use crate::core::Config;

/// Words containing "alot" that are spelled correctly
pub const ALOT_EXCEPTIONS: &[&str] = &["zealot", "zealots", "zealotry"];

/// Regional indicator letters, in order
pub const ALOT_REACTIONS: &[&str] = &["🇦", "🇱", "🇴", "🇹"];

pub fn mentions_mom(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("ur mom") || lower.contains("your mom")
}

pub fn mentions_alot(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("alot") && !ALOT_EXCEPTIONS.iter().any(|e| lower.contains(e))
}

/// Which triggers a message fires
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub mom: bool,
    pub alot: bool,
}

impl Triggers {
    pub fn scan(text: &str) -> Self {
        Self {
            mom: mentions_mom(text),
            alot: mentions_alot(text),
        }
    }

    pub fn any(&self) -> bool {
        self.mom || self.alot
    }
}

/// Run the triggers already scanned from `msg`
pub async fn respond(
    ctx: &Context,
    msg: &Message,
    config: &Config,
    triggers: Triggers,
) -> anyhow::Result<()> {
    if !triggers.any() {
        return Ok(());
    }

    if triggers.mom {
        debug!("'ur mom' trigger in channel {}", msg.channel_id);
        send_gif(ctx, msg, &config.urmom_gif()).await?;
    }

    if triggers.alot {
        debug!("'alot' trigger in channel {}", msg.channel_id);
        if config.use_reactions {
            for letter in ALOT_REACTIONS {
                msg.react(&ctx.http, ReactionType::Unicode(letter.to_string()))
                    .await?;
            }
        }
        if config.use_gif_responses {
            send_gif(ctx, msg, &config.alot_gif()).await?;
        }
    }

    Ok(())
}

async fn send_gif(ctx: &Context, msg: &Message, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        warn!("GIF not found at {}, skipping", path.display());
        return Ok(());
    }
    msg.channel_id
        .send_message(&ctx.http, |m| m.add_file(path))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mom_trigger() {
        assert!(mentions_mom("that's what ur mom said"));
        assert!(mentions_mom("YOUR MOM"));
        assert!(mentions_mom("Your Mom's house"));
        assert!(!mentions_mom("my mother"));
        assert!(!mentions_mom("urmom"));
    }

    #[test]
    fn test_alot_trigger() {
        assert!(mentions_alot("thanks alot"));
        assert!(mentions_alot("ALOT of people"));
        assert!(!mentions_alot("a lot of people"));
    }

    #[test]
    fn test_alot_exceptions() {
        assert!(!mentions_alot("what a zealot"));
        assert!(!mentions_alot("Zealotry everywhere"));
        // Any exception word suppresses the whole message
        assert!(!mentions_alot("alot of zealots"));
    }

    #[test]
    fn test_scan_combines_triggers() {
        let both = Triggers::scan("ur mom talks alot");
        assert!(both.mom && both.alot);
        assert!(!Triggers::scan("hello there").any());
    }

    #[test]
    fn test_reactions_spell_alot() {
        assert_eq!(ALOT_REACTIONS.concat(), "🇦🇱🇴🇹");
    }
}
