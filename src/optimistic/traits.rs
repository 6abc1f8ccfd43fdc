/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Cell Traits
//!
//! Defines the interface shared by cells and the views built over them.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::Arc;

use crate::optimistic::intent::{
    update,
    UpdateIntent,
};
use crate::optimistic::outcome::Outcome;
use crate::optimistic::signal::{
    restartable,
    retry,
    Flow,
    Restart,
};
use crate::optimistic::view::View;

/// Number of committed updates a versioned cell has seen.
pub type Version = u64;

/// Common trait for optimistically updated cells.
///
/// Provides an atomic read and a transactional `modify`. There is no way to
/// overwrite the value without going through `modify`.
///
/// # Bodies
///
/// A body may run several times for one logical `modify`, and may run
/// against a value that turns out to be stale. It must compute its intent
/// from the value it is given and must not mutate shared state outside the
/// cell: the effects of discarded runs are not undone.
///
/// # Author
///
/// Haixing Hu
pub trait Atomic {
    /// The value type stored in the cell.
    type Value;

    /// Gets the current value.
    ///
    /// A single atomic load. Never fails and never retries.
    fn read(&self) -> Self::Value;

    /// Runs one optimistic update attempt.
    ///
    /// Feeds `body` the current value. If the body signals
    /// [`Signal::Retry`](crate::Signal::Retry) it runs again against a fresh
    /// read. If it requests no update the attempt succeeds without touching
    /// the cell. Otherwise the new value is installed with a single CAS,
    /// which fails if another update committed since the read.
    ///
    /// # Parameters
    ///
    /// * `body` - Maps the observed value to an [`UpdateIntent`].
    ///
    /// # Returns
    ///
    /// The [`Outcome`] of the attempt, or `Err(Restart)` if the body
    /// requested a restart.
    fn modify<'a, R, F>(&'a self, body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&Self::Value) -> Flow<UpdateIntent<Self::Value, R>> + 'a;

    /// Creates a view of a part of this cell's value.
    ///
    /// # Parameters
    ///
    /// * `zoom_in` - Extracts the part from a whole value.
    /// * `zoom_out` - Rebuilds a whole value from the current whole and a new
    ///   part. It must satisfy `zoom_in(&zoom_out(a, b)) == b`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_optimistic::{restartable, retry, update, Atomic, AtomicCell};
    ///
    /// let cell = AtomicCell::new((1, "a"));
    /// let first = cell.view(|p: &(i32, &str)| p.0, |p, n| (n, p.1));
    /// restartable(|| first.modify(|_| Ok(update(5)))?.on_failure(retry));
    /// assert_eq!(cell.read(), (5, "a"));
    /// ```
    #[inline]
    fn view<B, In, Out>(&self, zoom_in: In, zoom_out: Out) -> View<&Self, In, Out>
    where
        Self: Sized,
        In: Fn(&Self::Value) -> B,
        Out: Fn(&Self::Value, B) -> Self::Value,
    {
        View::new(self, zoom_in, zoom_out)
    }

    /// Updates the value using a function, returning the old value.
    ///
    /// Retries lost races until the update commits.
    ///
    /// # Parameters
    ///
    /// * `f` - A function that takes the current value and returns the new
    ///   value.
    ///
    /// # Returns
    ///
    /// The value the update was applied to.
    fn get_and_update<F>(&self, f: F) -> Self::Value
    where
        Self::Value: Clone,
        F: Fn(&Self::Value) -> Self::Value,
    {
        restartable(|| {
            self.modify(|current| Ok(update(f(current)).with_result(current.clone())))?
                .on_failure(retry)
        })
    }

    /// Updates the value using a function, returning the new value.
    ///
    /// Retries lost races until the update commits.
    ///
    /// # Parameters
    ///
    /// * `f` - A function that takes the current value and returns the new
    ///   value.
    ///
    /// # Returns
    ///
    /// The value installed by the update.
    fn update_and_get<F>(&self, f: F) -> Self::Value
    where
        Self::Value: Clone,
        F: Fn(&Self::Value) -> Self::Value,
    {
        restartable(|| {
            self.modify(|current| {
                let new = f(current);
                Ok(update(new.clone()).with_result(new))
            })?
            .on_failure(retry)
        })
    }
}

/// Trait for cells that count their committed updates.
///
/// The version starts at 0 and grows by exactly one per committed update,
/// whether or not the new value differs from the old one.
///
/// # Author
///
/// Haixing Hu
pub trait VersionedAtomic: Atomic {
    /// Gets the current value together with its version.
    ///
    /// Both come from the same atomic load.
    fn read_with_version(&self) -> (Self::Value, Version);

    /// Gets the current version.
    #[inline]
    fn read_version(&self) -> Version {
        self.read_with_version().1
    }

    /// Runs one optimistic update attempt with access to the version.
    ///
    /// Behaves like [`Atomic::modify`], but the body also receives the
    /// version of the value it observes.
    fn modify_with_version<'a, R, F>(&'a self, body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&Self::Value, Version) -> Flow<UpdateIntent<Self::Value, R>> + 'a;
}

impl<C: Atomic + ?Sized> Atomic for &C {
    type Value = C::Value;

    #[inline]
    fn read(&self) -> C::Value {
        (**self).read()
    }

    #[inline]
    fn modify<'a, R, F>(&'a self, body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&C::Value) -> Flow<UpdateIntent<C::Value, R>> + 'a,
    {
        (**self).modify(body)
    }
}

impl<C: VersionedAtomic + ?Sized> VersionedAtomic for &C {
    #[inline]
    fn read_with_version(&self) -> (C::Value, Version) {
        (**self).read_with_version()
    }

    #[inline]
    fn modify_with_version<'a, R, F>(&'a self, body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&C::Value, Version) -> Flow<UpdateIntent<C::Value, R>> + 'a,
    {
        (**self).modify_with_version(body)
    }
}

impl<C: Atomic + ?Sized> Atomic for Arc<C> {
    type Value = C::Value;

    #[inline]
    fn read(&self) -> C::Value {
        (**self).read()
    }

    #[inline]
    fn modify<'a, R, F>(&'a self, body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&C::Value) -> Flow<UpdateIntent<C::Value, R>> + 'a,
    {
        (**self).modify(body)
    }
}

impl<C: VersionedAtomic + ?Sized> VersionedAtomic for Arc<C> {
    #[inline]
    fn read_with_version(&self) -> (C::Value, Version) {
        (**self).read_with_version()
    }

    #[inline]
    fn modify_with_version<'a, R, F>(&'a self, body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&C::Value, Version) -> Flow<UpdateIntent<C::Value, R>> + 'a,
    {
        (**self).modify_with_version(body)
    }
}
