//! # Features
//!
//! Each feature is a self-contained module; command handlers wire them to chat.

pub mod hockey;
pub mod movies;
pub mod reminders;
pub mod triggers;

pub use hockey::{HockeyService, LiveMonitor, PollCadence};
pub use movies::MovieLookup;
pub use reminders::{ReminderScheduler, ReminderStore};
pub use triggers::Triggers;
