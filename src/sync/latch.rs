//! One-shot completion latch.
//!
//! A [`Latch`] starts closed and is opened exactly once. Any number of
//! threads may block on it, before or after it opens; all of them are
//! released by the single [`Latch::open`] call and none can miss it.
//!
//! The latch carries no data. Callers pair it with a separately guarded
//! slot: write the slot first, then open the latch.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A one-shot signal that releases every waiter when opened.
#[derive(Debug, Default)]
pub struct Latch {
    open: Mutex<bool>,
    cvar: Condvar,
}

impl Latch {
    /// Creates a new closed latch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: Mutex::new(false),
            cvar: Condvar::new(),
        }
    }

    /// Returns `true` if the latch has been opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.lock()
    }

    /// Opens the latch and wakes every waiter.
    ///
    /// Returns `false` if the latch was already open.
    pub fn open(&self) -> bool {
        let mut open = self.open.lock();
        if *open {
            return false;
        }
        *open = true;
        drop(open);
        self.cvar.notify_all();
        true
    }

    /// Blocks until the latch is open.
    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cvar.wait(&mut open);
        }
    }

    /// Blocks until the latch is open or `deadline` passes.
    ///
    /// Returns `true` if the latch is open on return. An already-open latch
    /// returns `true` even when the deadline is in the past.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        let mut open = self.open.lock();
        while !*open {
            if self.cvar.wait_until(&mut open, deadline).timed_out() {
                return *open;
            }
        }
        true
    }

    /// Blocks until the latch is open or `timeout` elapses.
    ///
    /// A timeout too large to represent as an `Instant` waits without bound.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_until(deadline),
            None => {
                self.wait();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_closed_and_opens_once() {
        let latch = Latch::new();
        assert!(!latch.is_open());
        assert!(latch.open());
        assert!(latch.is_open());
        assert!(!latch.open(), "second open must report already open");
    }

    #[test]
    fn wait_after_open_returns_immediately() {
        let latch = Latch::new();
        latch.open();
        latch.wait();
        assert!(latch.wait_for(Duration::ZERO));
    }

    #[test]
    fn zero_timeout_on_closed_latch_times_out() {
        let latch = Latch::new();
        assert!(!latch.wait_for(Duration::ZERO));
    }

    #[test]
    fn releases_all_waiters() {
        let latch = Arc::new(Latch::new());
        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || latch.wait())
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        latch.open();

        for w in waiters {
            w.join().expect("waiter panicked");
        }
    }

    #[test]
    fn huge_timeout_does_not_overflow() {
        let latch = Latch::new();
        latch.open();
        assert!(latch.wait_for(Duration::MAX));
    }
}
