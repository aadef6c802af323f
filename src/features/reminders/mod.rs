//! # Reminders Feature
//!
//! User-set reminders parsed from natural time phrases, held in memory and
//! delivered by a background scheduler.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Reminders set in reply to a message quote that message
//! - 1.0.0: Initial release

pub mod scheduler;
pub mod store;
pub mod time_parser;

pub use scheduler::ReminderScheduler;
pub use store::{ReferencedMessage, Reminder, ReminderStore};
pub use time_parser::{parse_time, split_time_and_message};
