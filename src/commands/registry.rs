//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Registry holds prefix command handlers
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::PrefixCommandHandler;

/// Registry mapping command names to handlers
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(MomHandler));
///
/// if let Some(handler) = registry.get("mom") {
///     handler.handle(ctx, serenity_ctx, msg, args).await?;
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn PrefixCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for all names returned by `command_names()`
    pub fn register(&mut self, handler: Arc<dyn PrefixCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PrefixCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Number of registered command names (not unique handlers)
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::channel::Message;
    use serenity::prelude::Context;

    struct MockHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl PrefixCommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _msg: &Message,
            _args: &str,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_multiple_names() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler {
            names: &["remind", "reminder"],
        }));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("remind").is_some());
        assert!(registry.get("reminder").is_some());
        assert!(registry.get("cats").is_none());
    }

    #[test]
    fn test_registry_get_returns_handler() {
        let mut registry = CommandRegistry::default();
        registry.register(Arc::new(MockHandler { names: &["mom"] }));

        assert!(registry.get("mom").is_some());
        assert!(registry.get("dad").is_none());
    }

    #[test]
    fn test_all_handlers_register() {
        let mut registry = CommandRegistry::new();
        for handler in crate::commands::handlers::create_all_handlers() {
            registry.register(handler);
        }
        for name in ["mom", "movie", "remind", "cats"] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
    }
}
