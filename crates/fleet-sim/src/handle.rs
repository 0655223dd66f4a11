//! Cross-thread run control.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// How often a paused loop re-checks its flags.
const PAUSE_POLL: Duration = Duration::from_millis(5);

#[derive(Debug, Default)]
struct Flags {
    end:    AtomicBool,
    paused: AtomicBool,
}

/// Cloneable remote control for a running [`Simulation`](crate::Simulation).
///
/// Every request is observed at the next tick boundary; a tick in progress
/// always completes.
#[derive(Debug, Clone, Default)]
pub struct SimHandle {
    flags: Arc<Flags>,
}

impl SimHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop.  Also releases a paused loop.
    pub fn end_simulation(&self) {
        self.flags.end.store(true, Ordering::SeqCst);
    }

    pub fn is_end_requested(&self) -> bool {
        self.flags.end.load(Ordering::SeqCst)
    }

    pub fn pause(&self) {
        self.flags.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.flags.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.flags.paused.load(Ordering::SeqCst)
    }

    pub(crate) fn clear_end(&self) {
        self.flags.end.store(false, Ordering::SeqCst);
    }

    /// Block while paused.  Returns early once an end is requested.
    pub(crate) fn wait_while_paused(&self) {
        while self.is_paused() && !self.is_end_requested() {
            thread::sleep(PAUSE_POLL);
        }
    }
}
