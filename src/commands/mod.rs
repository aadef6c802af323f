//! # Command System
//!
//! Prefix (`!name args`) text commands.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Prefix commands dispatched through the handler registry
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod handler;
pub mod handlers;
pub mod parse;
pub mod registry;

pub use crate::command_handler::CommandHandler;

pub use context::CommandContext;
pub use handler::PrefixCommandHandler;
pub use parse::parse_command;
pub use registry::CommandRegistry;
