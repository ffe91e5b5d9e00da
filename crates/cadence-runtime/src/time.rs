//! Time sources sampled once per frame

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Where the game loop reads "now" from
pub trait TimeSource {
    fn now(&mut self) -> Instant;
}

/// The real monotonic clock
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicTime;

impl TimeSource for MonotonicTime {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test (or a simulated run) keeps one
/// handle and hands another to the loop.
#[derive(Debug, Clone)]
pub struct ManualTime {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move every handle forward by `by`
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn current(&self) -> Instant {
        self.now.get()
    }
}

impl TimeSource for ManualTime {
    fn now(&mut self) -> Instant {
        self.now.get()
    }
}
