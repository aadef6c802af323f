//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Holds the reminder store, movie lookup, hockey service and live monitor
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::core::Config;
use crate::features::hockey::{HockeyService, LiveMonitor};
use crate::features::movies::MovieLookup;
use crate::features::reminders::ReminderStore;

/// Services every handler can reach
///
/// The reminder store and live monitor are also driven by background tasks,
/// so they are shared handles.
pub struct CommandContext {
    pub config: Config,
    pub reminders: ReminderStore,
    pub movies: MovieLookup,
    pub hockey: Arc<HockeyService>,
    pub live: Arc<LiveMonitor>,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        let movies = MovieLookup::new(&config.omdb_api_url, config.omdb_api_key.as_deref());
        let hockey = Arc::new(HockeyService::new(&config));
        let live = Arc::new(LiveMonitor::new(config.team.clone()));
        Self {
            config,
            reminders: ReminderStore::new(),
            movies,
            hockey,
            live,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.config.command_prefix
    }
}
