//! Logging facilities for Orbit.
//!
//! Orbit uses the `tracing` crate for instrumentation. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("orbit=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All Orbit crates log under the stable target names in [`targets`], so a
//! filter like `orbit::carousel=debug` isolates wrap corrections.

/// Span names used throughout Orbit for tracing.
pub mod span_names {
    /// Wrap-region rebuild span.
    pub const REBUILD: &str = "orbit::rebuild";
    /// Settle handling span.
    pub const SETTLE: &str = "orbit::settle";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "orbit_core::signal";
    /// Source lists and the cyclic adapter.
    pub const MODEL: &str = "orbit::model";
    /// Selection-wrap coordination and the carousel controller.
    pub const CAROUSEL: &str = "orbit::carousel";
    /// Performance spans.
    pub const PERF: &str = "orbit::perf";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_enters_and_drops() {
        let span = PerfSpan::new("unit");
        drop(span);
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::SIGNAL, targets::MODEL, targets::CAROUSEL, targets::PERF] {
            assert!(target.starts_with("orbit"));
        }
        assert!(span_names::REBUILD.starts_with("orbit::"));
    }
}
