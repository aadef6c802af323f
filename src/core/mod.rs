//! # Core Module
//!
//! Configuration, Discord size limits, embed cards and pending selections shared by all features.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add selection module for numbered replies and the Reply type
//! - 1.1.0: Add embed cards
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod embeds;
pub mod reply;
pub mod response;
pub mod selection;

// Re-export commonly used items
pub use config::{Config, TrackedTeam};
pub use embeds::Card;
pub use reply::Reply;
pub use response::{mention, truncate_for_embed, truncate_for_field, truncate_for_message};
pub use selection::PendingSelections;
