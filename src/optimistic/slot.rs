/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Shared Slot
//!
//! The single shared word behind every cell, and the compare-and-swap
//! retry loop that all optimistic updates run through.
//!
//! # Implementation Details
//!
//! The value lives in a heap node referenced by a
//! `crossbeam_epoch::Atomic<T>`. Every committed update installs a fresh
//! node, so comparing node addresses is the same as asking whether the slot
//! still holds the value that was read. A thread stays pinned from its load
//! until its CAS completes, so the node it read cannot be freed and its
//! address cannot be reused in between. Replaced nodes are destroyed once no
//! pinned thread can still see them.
//!
//! # Memory Ordering
//!
//! - Loads use `Acquire`.
//! - The CAS uses `AcqRel` on success and `Acquire` on failure.
//!
//! # Author
//!
//! Haixing Hu

use std::ops::Deref;
use std::sync::atomic::Ordering;

use crossbeam_epoch::{
    self as epoch,
    Atomic,
    Guard,
    Owned,
    Shared,
};
use tracing::trace;

use crate::optimistic::signal::{
    Flow,
    Restart,
    Signal,
};

/// Result of running the retry loop once to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CasAttempt<R> {
    /// The update committed, or none was requested.
    Committed(R),
    /// A concurrent writer replaced the value after it was read.
    Lost(R),
}

/// A value read from a [`Slot`], valid while the reading guard is pinned.
pub(crate) struct Snapshot<'g, T> {
    shared: Shared<'g, T>,
}

impl<'g, T> Deref for Snapshot<'g, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        // SAFETY: a slot is never null, and the node stays alive while the
        // guard that loaded it remains pinned.
        unsafe { self.shared.deref() }
    }
}

/// One shared, never-empty, CAS-updated slot.
pub(crate) struct Slot<T> {
    inner: Atomic<T>,
}

impl<T> Slot<T> {
    /// Creates a slot holding `value`.
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Atomic::new(value),
        }
    }

    /// Loads the current value under `guard`.
    #[inline]
    pub(crate) fn load<'g>(&self, guard: &'g Guard) -> Snapshot<'g, T> {
        Snapshot {
            shared: self.inner.load(Ordering::Acquire, guard),
        }
    }

    /// Runs `f` against the current value.
    #[inline]
    pub(crate) fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = epoch::pin();
        f(&*self.load(&guard))
    }

    /// Consumes the slot, returning its value.
    pub(crate) fn into_inner(self) -> T {
        // SAFETY: we own the slot, so no other thread can observe the node.
        // Leaving null behind tells `drop` there is nothing left to free.
        let owned = unsafe {
            self.inner
                .swap(Shared::null(), Ordering::Relaxed, epoch::unprotected())
                .into_owned()
        };
        *owned.into_box()
    }
}

impl<T: Send + 'static> Slot<T> {
    /// Replaces the value with `new` if the slot still holds `expected`.
    ///
    /// On success the replaced node is scheduled for destruction.
    ///
    /// # Returns
    ///
    /// `true` if the swap happened.
    pub(crate) fn compare_and_set<'g>(
        &self,
        expected: &Snapshot<'g, T>,
        new: T,
        guard: &'g Guard,
    ) -> bool {
        match self.inner.compare_exchange(
            expected.shared,
            Owned::new(new),
            Ordering::AcqRel,
            Ordering::Acquire,
            guard,
        ) {
            Ok(_) => {
                // SAFETY: the node is unlinked; threads still reading it are
                // pinned, and destruction waits until they unpin.
                unsafe { guard.defer_destroy(expected.shared) };
                true
            }
            Err(_) => false,
        }
    }

    /// Runs one optimistic update to completion.
    ///
    /// Loads the value and evaluates `step` against it. When `step` signals
    /// a retry the attempt is discarded and the loop starts over from a fresh
    /// load. When `step` requests no update the attempt commits without a
    /// CAS. Otherwise a single CAS decides the attempt.
    ///
    /// # Parameters
    ///
    /// * `step` - Maps the observed value to `(update, result)`. It may be
    ///   evaluated many times, against values that later turn out stale.
    ///
    /// # Returns
    ///
    /// The settled attempt, or `Err(Restart)` if `step` requested one.
    pub(crate) fn attempt<R, F>(&self, mut step: F) -> Result<CasAttempt<R>, Restart>
    where
        F: FnMut(&T) -> Flow<(Option<T>, R)>,
    {
        let mut guard = epoch::pin();
        loop {
            let current = self.load(&guard);
            match step(&*current) {
                Ok((None, result)) => return Ok(CasAttempt::Committed(result)),
                Ok((Some(new), result)) => {
                    if self.compare_and_set(&current, new, &guard) {
                        return Ok(CasAttempt::Committed(result));
                    }
                    trace!("compare-and-swap lost to a concurrent update");
                    return Ok(CasAttempt::Lost(result));
                }
                Err(Signal::Retry) => trace!("body requested retry; reloading"),
                Err(Signal::Restart(restart)) => return Err(restart),
            }
            guard.repin();
        }
    }
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        // SAFETY: `&mut self` means no other thread holds a reference.
        unsafe {
            let shared = self.inner.load(Ordering::Relaxed, epoch::unprotected());
            if !shared.is_null() {
                drop(shared.into_owned());
            }
        }
    }
}
