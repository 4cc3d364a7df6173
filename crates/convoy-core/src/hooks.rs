//! Lifecycle hooks: an ordered observer list around a run.
//!
//! Hooks are invoked synchronously at defined points; a failing hook is
//! logged and never reaches the scheduler.

use std::time::Duration;

use anyhow::Result;

use crate::apply::ApplyOptions;

/// Observer of run lifecycle events. Both methods default to no-ops.
pub trait Hook: Send + Sync {
    /// Called once before any task starts, with the full target list.
    fn apply_start(&self, _nodes: &[String], _opts: &ApplyOptions) -> Result<()> {
        Ok(())
    }

    /// Called once after the pool has drained, with the run duration.
    fn apply_end(&self, _nodes: &[String], _duration: Duration) -> Result<()> {
        Ok(())
    }
}

/// Registered hooks, invoked in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub fn apply_start(&self, nodes: &[String], opts: &ApplyOptions) {
        for hook in &self.hooks {
            if let Err(err) = hook.apply_start(nodes, opts) {
                tracing::warn!("apply_start hook failed: {:#}", err);
            }
        }
    }

    pub fn apply_end(&self, nodes: &[String], duration: Duration) {
        for hook in &self.hooks {
            if let Err(err) = hook.apply_end(nodes, duration) {
                tracing::warn!("apply_end hook failed: {:#}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct RecordingHook {
        label: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Hook for RecordingHook {
        fn apply_start(&self, nodes: &[String], _opts: &ApplyOptions) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}:start:{}", self.label, nodes.len()));
            if self.fail {
                anyhow::bail!("hook blew up");
            }
            Ok(())
        }

        fn apply_end(&self, _nodes: &[String], _duration: Duration) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}:end", self.label));
            Ok(())
        }
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry.register(Box::new(RecordingHook {
            label: "first",
            calls: Arc::clone(&calls),
            fail: false,
        }));
        registry.register(Box::new(RecordingHook {
            label: "second",
            calls: Arc::clone(&calls),
            fail: false,
        }));

        let nodes = vec!["a".to_string(), "b".to_string()];
        registry.apply_start(&nodes, &ApplyOptions::default());
        registry.apply_end(&nodes, Duration::from_secs(1));

        assert_eq!(
            *calls.lock().unwrap(),
            ["first:start:2", "second:start:2", "first:end", "second:end"]
        );
    }

    #[test]
    fn failing_hook_does_not_stop_later_hooks() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry.register(Box::new(RecordingHook {
            label: "bad",
            calls: Arc::clone(&calls),
            fail: true,
        }));
        registry.register(Box::new(RecordingHook {
            label: "good",
            calls: Arc::clone(&calls),
            fail: false,
        }));

        registry.apply_start(&["n".to_string()], &ApplyOptions::default());
        assert_eq!(*calls.lock().unwrap(), ["bad:start:1", "good:start:1"]);
    }

    #[test]
    fn empty_registry_is_a_noop() {
        let registry = HookRegistry::new();
        registry.apply_start(&[], &ApplyOptions::default());
        registry.apply_end(&[], Duration::ZERO);
    }
}
