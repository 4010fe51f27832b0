//! Registered / torn-down state for adapters.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ChatError;

/// Torn-down flag shared by an adapter's methods; starts active.
#[derive(Debug, Default)]
pub struct Lifecycle {
    torn_down: AtomicBool,
}

impl Lifecycle {
    /// A fresh, active lifecycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `AdapterTornDown` once [`tear_down`](Self::tear_down) has run.
    pub fn ensure_active(&self, adapter_id: &str) -> Result<(), ChatError> {
        if self.is_torn_down() {
            return Err(ChatError::AdapterTornDown(adapter_id.to_string()));
        }
        Ok(())
    }

    /// Mark as torn down. Returns `true` only for the first call.
    pub fn tear_down(&self) -> bool {
        !self.torn_down.swap(true, Ordering::AcqRel)
    }

    /// Whether teardown has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }
}
