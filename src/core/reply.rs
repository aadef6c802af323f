//! What a handler wants posted back to the channel

use serenity::http::Http;
use serenity::model::id::ChannelId;

use crate::core::embeds::Card;
use crate::core::response::truncate_for_message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Card(Card),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text(content.into())
    }

    /// Text content, if this is a plain message
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Card(_) => None,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Reply::Card(card) => Some(card),
            Reply::Text(_) => None,
        }
    }

    pub async fn send(&self, http: &Http, channel_id: ChannelId) -> anyhow::Result<()> {
        match self {
            Reply::Text(text) => {
                channel_id.say(http, truncate_for_message(text)).await?;
            }
            Reply::Card(card) => {
                let embed = card.to_embed();
                channel_id
                    .send_message(http, |m| m.set_embed(embed))
                    .await?;
            }
        }
        Ok(())
    }
}

impl From<Card> for Reply {
    fn from(card: Card) -> Self {
        Reply::Card(card)
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}
