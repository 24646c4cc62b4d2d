// Path: crates/telemetry/src/time.rs
use std::time::Instant;

/// Logs how long a scope took when dropped.
pub struct ScopeTimer {
    label: &'static str,
    start: Instant,
}

impl ScopeTimer {
    /// Starts timing the surrounding scope under `label`.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        tracing::debug!(
            label = self.label,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "scope finished"
        );
    }
}
