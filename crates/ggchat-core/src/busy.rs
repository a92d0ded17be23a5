//! Single-flight operation guards.
//!
//! Each I/O-bearing operation (listing, fetch, load, completion) allows at
//! most one invocation in flight. A second call arriving while busy is
//! rejected synchronously with [`ChatError::Busy`] rather than queued.

use crate::error::ChatError;
use std::sync::atomic::{AtomicBool, Ordering};

/// A boolean busy guard for one logical operation slot.
///
/// Acquiring the guard yields an [`OpPermit`] whose `Drop` releases the
/// slot, so the guard clears on every exit path including panics and
/// early `?` returns.
#[derive(Debug)]
pub struct OpGuard {
    operation: &'static str,
    busy: AtomicBool,
}

impl OpGuard {
    /// Create a guard for the named operation.
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            busy: AtomicBool::new(false),
        }
    }

    /// Try to claim the slot.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Busy`] if a prior invocation has not settled.
    pub fn try_begin(&self) -> Result<OpPermit<'_>, ChatError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(OpPermit { guard: self })
        } else {
            Err(ChatError::Busy {
                operation: self.operation,
            })
        }
    }

    /// Whether an invocation is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII permit for a claimed operation slot.
#[derive(Debug)]
pub struct OpPermit<'a> {
    guard: &'a OpGuard,
}

impl Drop for OpPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
