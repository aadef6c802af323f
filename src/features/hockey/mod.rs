//! # Hockey Feature
//!
//! `!cats` team info from the NHL APIs and live game updates for subscribed channels.
//!
//! - **Version**: 1.4.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.4.0: Playoff bracket, series and round views; live games followed past midnight
//! - 1.3.0: Tracked team, season and poll cadence come from config
//! - 1.2.0: Player stats with numbered selection
//! - 1.1.0: Team comparison and live updates
//! - 1.0.0: Initial release with overview, quote, game and recent

pub mod client;
pub mod compare;
pub mod format;
pub mod live;
pub mod models;
pub mod players;
pub mod playoffs;
pub mod schedule;
pub mod service;

pub use client::{current_season_id, NhlClient};
pub use live::{LiveEvent, LiveMonitor, PollCadence};
pub use models::Game;
pub use service::HockeyService;
