//! Cache invalidation shared with the asynchronous notification handler.
//!
//! The flag is the only state touched from signal context. Setting it is a
//! single atomic store, which is async-signal-safe; the sampling side consumes
//! it with an atomic swap so a notification landing between "read" and
//! "clear" is never lost.

use std::sync::atomic::{AtomicBool, Ordering};

/// One-bit "cached value is stale" marker.
#[derive(Debug)]
pub struct DirtyFlag(AtomicBool);

impl DirtyFlag {
    pub const fn new(dirty: bool) -> Self {
        Self(AtomicBool::new(dirty))
    }

    /// Mark the cached value stale. Safe to call from a signal handler.
    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consume the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_dirty(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for DirtyFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Flag the notification handler marks when the keyboard layout changes.
pub static LAYOUT_DIRTY: DirtyFlag = DirtyFlag::new(false);
