//! Cancellation and progress reporting shared by the optimizer and the
//! orchestrator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable, thread-safe stop flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Snapshot of a running solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Trials evaluated so far.
    pub trials_done: u64,
    /// Trials requested.
    pub trials_total: u64,
    /// Lowest cost seen, if any trial finished.
    pub best_cost: Option<f64>,
    /// Time since the run started.
    pub elapsed: Duration,
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.trials_total == 0 {
            1.0
        } else {
            (self.trials_done as f64 / self.trials_total as f64).min(1.0)
        }
    }
}

/// Time-based rate limiter for progress reports.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl ProgressThrottle {
    /// Allows at most one report per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Whether a report is due now. The first call always is.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_shared_between_clones() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_throttle() {
        let mut t = ProgressThrottle::new(Duration::from_secs(3600));
        assert!(t.ready());
        assert!(!t.ready());

        let mut always = ProgressThrottle::new(Duration::ZERO);
        assert!(always.ready());
        assert!(always.ready());
    }

    #[test]
    fn test_fraction() {
        let p = Progress {
            trials_done: 25,
            trials_total: 100,
            best_cost: None,
            elapsed: Duration::ZERO,
        };
        assert_eq!(p.fraction(), 0.25);
    }
}
