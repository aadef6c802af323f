//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 3.0.0: Prefix command handlers (mom, movie, remind, cats)
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod cats;
pub mod mom;
pub mod movie;
pub mod remind;

use std::sync::Arc;

use super::handler::PrefixCommandHandler;

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Arc<dyn PrefixCommandHandler>> {
    vec![
        Arc::new(mom::MomHandler),
        Arc::new(movie::MovieHandler),
        Arc::new(remind::RemindHandler),
        Arc::new(cats::CatsHandler),
    ]
}
