//! Progress reporting seam between scaffolding operations and the terminal.

/// Receiver of step-level progress events.
///
/// Operations call these strictly in the order `add` → `start` →
/// (`complete` | `error`) for each step key they own.
pub trait ProgressSink {
    /// Register a step under `key` with a human-readable label
    fn add(&mut self, key: &str, label: &str);

    /// Mark a registered step as running
    fn start(&mut self, key: &str);

    /// Mark a step as finished with a short summary
    fn complete(&mut self, key: &str, detail: &str);

    /// Mark a step as failed with the error description
    fn error(&mut self, key: &str, detail: &str);
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn add(&mut self, _key: &str, _label: &str) {}
    fn start(&mut self, _key: &str) {}
    fn complete(&mut self, _key: &str, _detail: &str) {}
    fn error(&mut self, _key: &str, _detail: &str) {}
}
