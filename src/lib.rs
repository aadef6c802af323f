// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::Config;
pub use features::{HockeyService, LiveMonitor, MovieLookup, ReminderScheduler, ReminderStore};
