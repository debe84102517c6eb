//! Built-in tool implementations for Seedcall.
//!
//! The demo ships a single tool — a current-local-time provider — but the
//! registry is open: any `Tool` implementation registered before the run
//! becomes callable by the model.

pub mod local_time;

use seedcall_core::tool::ToolRegistry;

pub use local_time::LocalTimeTool;

/// Create the default tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(LocalTimeTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_the_clock() {
        let registry = default_registry();
        assert!(registry.get("get_current_local_time").is_some());
        assert_eq!(registry.descriptors().len(), 1);
    }
}
