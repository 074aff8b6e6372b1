//! Injected diagnostic sink.
//!
//! The pipeline reports non-fatal events (skipped paths, source selection,
//! batch sizes) through this trait instead of a process-wide logger, so
//! callers can capture or silence it per invocation.

/// Sink for non-fatal pipeline diagnostics.
pub trait Diagnostics {
    fn debug(&self, message: &str);
}

/// Discards all diagnostics. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn debug(&self, _message: &str) {}
}

/// Forwards diagnostics to the `tracing` subscriber at DEBUG level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "schemtrace", "{}", message);
    }
}
