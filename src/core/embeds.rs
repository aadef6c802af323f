//! Embed cards for Discord responses
//!
//! Formatting code builds a [`Card`] and the send site turns it into serenity's
//! `CreateEmbed`, so reply layouts can be checked without a gateway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use crate::core::response::{truncate_for_embed, truncate_for_field};
use serenity::builder::CreateEmbed;

/// Team red used by the `!cats` family
pub const TEAM_COLOR: u32 = 0xC8102E;
/// Muted grey for "disabled" states
pub const GREY: u32 = 0x808080;
/// Discord blurple, used for movie cards
pub const BLURPLE: u32 = 0x5865F2;
/// NHL blue, used for player cards
pub const NHL_BLUE: u32 = 0x005BB7;
/// Gold, used for team comparisons
pub const GOLD: u32 = 0xB8860B;
/// Trophy gold, used for the playoff bracket
pub const TROPHY_GOLD: u32 = 0xFFD700;
/// Error red
pub const RED: u32 = 0xFF0000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<Field>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
}

impl Card {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            ..Default::default()
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.push_field(name, value, inline);
        self
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Look up a field value by name
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Build the serenity embed, applying Discord's size limits
    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        embed.title(&self.title);
        embed.color(self.color);
        if let Some(description) = &self.description {
            embed.description(truncate_for_embed(description));
        }
        for field in &self.fields {
            // Discord rejects empty field values
            let value = if field.value.is_empty() {
                "N/A".to_string()
            } else {
                truncate_for_field(&field.value)
            };
            embed.field(&field.name, value, field.inline);
        }
        if let Some(footer) = &self.footer {
            embed.footer(|f| f.text(footer));
        }
        if let Some(url) = &self.thumbnail {
            embed.thumbnail(url);
        }
        embed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_builder_collects_fields() {
        let card = Card::new("Title", TEAM_COLOR)
            .description("Body")
            .field("A", "1", true)
            .field("B", "2", false)
            .footer("Go!");

        assert_eq!(card.title, "Title");
        assert_eq!(card.description.as_deref(), Some("Body"));
        assert_eq!(card.fields.len(), 2);
        assert_eq!(card.field_value("B"), Some("2"));
        assert_eq!(card.field_value("C"), None);
        assert_eq!(card.footer.as_deref(), Some("Go!"));
    }

    #[test]
    fn test_to_embed_handles_oversized_and_empty_values() {
        let card = Card::new("Big", GOLD)
            .description("x".repeat(5000))
            .field("Empty", "", true)
            .field("Long", "y".repeat(2000), false)
            .thumbnail("https://example.com/poster.png");
        // CreateEmbed is opaque; building it must not panic
        let _embed = card.to_embed();
    }
}
