/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Cell
//!
//! A shared value that can only be changed through optimistic updates.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;

use crate::optimistic::intent::UpdateIntent;
use crate::optimistic::outcome::Outcome;
use crate::optimistic::signal::{
    Flow,
    Restart,
};
use crate::optimistic::slot::{
    CasAttempt,
    Slot,
};
use crate::optimistic::traits::Atomic;

/// A lock-free cell updated by compare-and-swap.
///
/// Reads are single atomic loads. Updates go through [`Atomic::modify`],
/// which never blocks: under contention it reports a lost race as
/// [`Outcome::Failure`] and leaves the decision to retry to the caller.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::{restartable, retry, update, Atomic, AtomicCell};
/// use std::sync::Arc;
/// use std::thread;
///
/// let cell = Arc::new(AtomicCell::new(0));
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let cell = cell.clone();
///         thread::spawn(move || {
///             restartable(|| cell.modify(|v| Ok(update(v + 1)))?.on_failure(retry))
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(cell.read(), 4);
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct AtomicCell<A> {
    slot: Slot<A>,
}

impl<A> AtomicCell<A> {
    /// Creates a new cell.
    ///
    /// # Parameters
    ///
    /// * `initial` - The initial value.
    #[inline]
    pub fn new(initial: A) -> Self {
        Self {
            slot: Slot::new(initial),
        }
    }

    /// Consumes the cell, returning its value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.slot.into_inner()
    }
}

impl<A> Atomic for AtomicCell<A>
where
    A: Clone + Send + Sync + 'static,
{
    type Value = A;

    #[inline]
    fn read(&self) -> A {
        self.slot.with(A::clone)
    }

    fn modify<'a, R, F>(&'a self, mut body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&A) -> Flow<UpdateIntent<A, R>> + 'a,
    {
        let attempt = self
            .slot
            .attempt(|current| body(current).map(UpdateIntent::into_parts))?;
        Ok(match attempt {
            CasAttempt::Committed(result) => Outcome::Success(result),
            CasAttempt::Lost(candidate) => Outcome::failure(move || self.modify(body), candidate),
        })
    }
}

impl<A: Default> Default for AtomicCell<A> {
    #[inline]
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<A> From<A> for AtomicCell<A> {
    #[inline]
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

impl<A: fmt::Debug> fmt::Debug for AtomicCell<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slot
            .with(|value| f.debug_struct("AtomicCell").field("value", value).finish())
    }
}

impl<A: fmt::Display> fmt::Display for AtomicCell<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slot.with(|value| write!(f, "{}", value))
    }
}
