//! Wall-clock allowance for one end-to-end request.
//!
//! A budget is created once at the top of a request and consulted before
//! every piece of dependent work. Running out of budget is not an error:
//! callers skip or truncate work and return what they have.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Clock, SystemClock};

/// Remaining-time tracker for a single request.
///
/// Once `remaining()` drops to the guard threshold, `has_margin` answers
/// false for any amount of work, so no new provider call is started while
/// the response can still be assembled and sent.
#[derive(Clone)]
pub struct DeadlineBudget {
    deadline: Instant,
    guard: Duration,
    clock: Arc<dyn Clock>,
}

impl DeadlineBudget {
    /// Starts a budget of `window` with the given guard threshold.
    pub fn start(window: Duration, guard: Duration) -> Self {
        Self::start_with_clock(window, guard, Arc::new(SystemClock))
    }

    /// Starts a budget against an explicit clock.
    pub fn start_with_clock(window: Duration, guard: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            deadline: clock.now() + window,
            guard,
            clock,
        }
    }

    /// Time left before the deadline, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(self.clock.now())
    }

    /// Whether `needed` more work can still be started.
    ///
    /// False once the guard threshold is reached, even if `needed` is tiny.
    pub fn has_margin(&self, needed: Duration) -> bool {
        let remaining = self.remaining();
        remaining > self.guard && remaining >= needed
    }

    /// Whether the budget is inside the guard threshold.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() <= self.guard
    }

    /// Caps a per-call timeout at what the budget can still afford.
    pub fn clamp(&self, call_timeout: Duration) -> Duration {
        call_timeout.min(self.remaining())
    }
}

impl std::fmt::Debug for DeadlineBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeadlineBudget")
            .field("remaining", &self.remaining())
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
