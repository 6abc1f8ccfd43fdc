/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Versioned Atomic Cell
//!
//! An atomic cell that also counts its committed updates.
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
use crate::optimistic::traits::{
    Atomic,
    Version,
    VersionedAtomic,
};

/// A value paired with the number of updates that led to it.
///
/// Both fields live in the same slot node, so they are read and replaced
/// together.
struct Stamped<A> {
    value: A,
    version: Version,
}

/// A lock-free cell that pairs its value with a version.
///
/// The version starts at 0 and grows by exactly one for every committed
/// update, even one that installs a value equal to the current one. Read-only
/// `modify` calls do not change it.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::{
///     restartable, retry, update, Atomic, VersionedAtomic, VersionedAtomicCell,
/// };
///
/// let cell = VersionedAtomicCell::new("draft");
/// restartable(|| cell.modify(|_| Ok(update("final")))?.on_failure(retry));
/// assert_eq!(cell.read_with_version(), ("final", 1));
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct VersionedAtomicCell<A> {
    slot: Slot<Stamped<A>>,
}

impl<A> VersionedAtomicCell<A> {
    /// Creates a new cell at version 0.
    ///
    /// # Parameters
    ///
    /// * `initial` - The initial value.
    #[inline]
    pub fn new(initial: A) -> Self {
        Self {
            slot: Slot::new(Stamped {
                value: initial,
                version: 0,
            }),
        }
    }

    /// Consumes the cell, returning its value and version.
    #[inline]
    pub fn into_inner(self) -> (A, Version) {
        let Stamped { value, version } = self.slot.into_inner();
        (value, version)
    }
}

impl<A> Atomic for VersionedAtomicCell<A>
where
    A: Clone + Send + Sync + 'static,
{
    type Value = A;

    #[inline]
    fn read(&self) -> A {
        self.read_with_version().0
    }

    #[inline]
    fn modify<'a, R, F>(&'a self, mut body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&A) -> Flow<UpdateIntent<A, R>> + 'a,
    {
        self.modify_with_version(move |value: &A, _| body(value))
    }
}

impl<A> VersionedAtomic for VersionedAtomicCell<A>
where
    A: Clone + Send + Sync + 'static,
{
    #[inline]
    fn read_with_version(&self) -> (A, Version) {
        self.slot
            .with(|stamped| (stamped.value.clone(), stamped.version))
    }

    fn modify_with_version<'a, R, F>(&'a self, mut body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&A, Version) -> Flow<UpdateIntent<A, R>> + 'a,
    {
        let attempt = self.slot.attempt(|current| {
            let (update, result) = body(&current.value, current.version)?.into_parts();
            let next = update.map(|value| Stamped {
                value,
                version: current.version + 1,
            });
            Ok((next, result))
        })?;
        Ok(match attempt {
            CasAttempt::Committed(result) => Outcome::Success(result),
            CasAttempt::Lost(candidate) => {
                Outcome::failure(move || self.modify_with_version(body), candidate)
            }
        })
    }
}

impl<A: Default> Default for VersionedAtomicCell<A> {
    #[inline]
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<A> From<A> for VersionedAtomicCell<A> {
    #[inline]
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

impl<A: fmt::Debug> fmt::Debug for VersionedAtomicCell<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slot.with(|stamped| {
            f.debug_struct("VersionedAtomicCell")
                .field("value", &stamped.value)
                .field("version", &stamped.version)
                .finish()
        })
    }
}

impl<A: fmt::Display> fmt::Display for VersionedAtomicCell<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slot
            .with(|stamped| write!(f, "{}@{}", stamped.value, stamped.version))
    }
}
