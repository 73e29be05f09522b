//! Explicit timing for dev mode.

use std::time::{Duration, Instant};

/// Runs `f`, and when `enabled` logs how long it took under `label`.
///
/// The elapsed time is returned whenever it was measured.
pub fn timed<T>(enabled: bool, label: &str, f: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if !enabled {
        return (f(), None);
    }

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    tracing::info!("{} executed in {:.4} sc", label, elapsed.as_secs_f64());
    (result, Some(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn disabled_timing_measures_nothing() {
        let (value, elapsed) = timed(false, "noop", || 41 + 1);
        assert_eq!(value, 42);
        assert!(elapsed.is_none());
    }

    #[test]
    #[traced_test]
    fn enabled_timing_logs_the_label() {
        let (value, elapsed) = timed(true, "search", || "done");
        assert_eq!(value, "done");
        assert!(elapsed.is_some());
        assert!(logs_contain("search executed in"));
    }
}
