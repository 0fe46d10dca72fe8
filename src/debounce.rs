//! Trailing-edge debounce timer with a single pending slot.
//!
//! Arming while a delivery is pending supersedes it: the old payload is
//! dropped and the quiescence window restarts. The payload is handed out
//! exactly once, by the first [`poll`](Debouncer::poll) at or after the
//! deadline. There is no leading-edge delivery.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use color_wrap::debounce::Debouncer;
//!
//! let start = Instant::now();
//! let mut timer = Debouncer::new(Duration::from_millis(100));
//! timer.arm("first", start);
//! timer.arm("second", start + Duration::from_millis(50));
//!
//! assert_eq!(timer.poll(start + Duration::from_millis(120)), None);
//! assert_eq!(timer.poll(start + Duration::from_millis(150)), Some("second"));
//! assert_eq!(timer.poll(start + Duration::from_millis(500)), None);
//! ```

use std::time::{Duration, Instant};

use tracing::trace;

/// Default quiescence window for completed-change delivery.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug)]
struct Pending<T> {
    payload: T,
    deadline: Instant,
}

/// A single-slot trailing-edge timer.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Creates an idle timer with the given quiescence window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// Arms the timer with `payload`, superseding any pending delivery.
    ///
    /// Returns `true` if a pending delivery was superseded.
    pub fn arm(&mut self, payload: T, now: Instant) -> bool {
        let deadline = now + self.window;
        let superseded = self.pending.replace(Pending { payload, deadline }).is_some();
        trace!(superseded, window_ms = self.window.as_millis() as u64, "debounce armed");
        superseded
    }

    /// Takes the payload if the window has elapsed; otherwise leaves it armed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }
        trace!("debounce fired");
        self.pending.take().map(|pending| pending.payload)
    }

    /// Drops any pending payload without delivering it.
    ///
    /// Returns `true` if something was pending.
    pub fn release(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// When the pending payload becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// True while a payload is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The quiescence window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
