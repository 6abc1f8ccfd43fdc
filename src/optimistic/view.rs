/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Views
//!
//! A view presents part of a cell's value as a cell of its own. It holds no
//! state besides its inner cell and two pure functions, and every update
//! made through it is an update of the whole inner value, committed by the
//! inner cell's CAS. Writers of the part and writers of the whole therefore
//! race for the same slot.
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
use crate::optimistic::traits::{
    Atomic,
    Version,
    VersionedAtomic,
};

/// A lens-shaped view into part of an inner cell's value.
///
/// `C` is the inner cell: usually `&AtomicCell<A>` (see
/// [`Atomic::view`]), or `Arc<AtomicCell<A>>` when the view must share
/// ownership of its cell. A view over a view is also a view.
///
/// # Lens Contract
///
/// `zoom_in(&zoom_out(&a, b))` must equal `b`. The view does not check it; a
/// pair of functions that breaks it corrupts the inner value.
///
/// # Versions
///
/// Over a versioned cell a view is versioned as well. The version it reports
/// is the inner cell's: it counts updates to the whole value, including those
/// that left this part unchanged.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::{Atomic, AtomicCell, View};
/// use std::sync::Arc;
///
/// let cell = Arc::new(AtomicCell::new((3, String::from("x"))));
/// let count = View::new(
///     Arc::clone(&cell),
///     |p: &(i32, String)| p.0,
///     |p, n| (n, p.1.clone()),
/// );
/// assert_eq!(count.update_and_get(|n| n + 1), 4);
/// assert_eq!(cell.read(), (4, String::from("x")));
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct View<C, In, Out> {
    inner: C,
    zoom_in: In,
    zoom_out: Out,
}

impl<C, In, Out> View<C, In, Out> {
    /// Creates a view over `inner`.
    ///
    /// # Parameters
    ///
    /// * `inner` - The cell that owns the whole value.
    /// * `zoom_in` - Extracts the part from a whole value.
    /// * `zoom_out` - Rebuilds a whole value from the current whole and a new
    ///   part.
    #[inline]
    pub fn new<B>(inner: C, zoom_in: In, zoom_out: Out) -> Self
    where
        C: Atomic,
        In: Fn(&C::Value) -> B,
        Out: Fn(&C::Value, B) -> C::Value,
    {
        Self {
            inner,
            zoom_in,
            zoom_out,
        }
    }

    /// Gets the inner cell.
    #[inline]
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C, B, In, Out> Atomic for View<C, In, Out>
where
    C: Atomic,
    In: Fn(&C::Value) -> B,
    Out: Fn(&C::Value, B) -> C::Value,
{
    type Value = B;

    #[inline]
    fn read(&self) -> B {
        (self.zoom_in)(&self.inner.read())
    }

    fn modify<'a, R, F>(&'a self, mut body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&B) -> Flow<UpdateIntent<B, R>> + 'a,
    {
        let zoom_in = &self.zoom_in;
        let zoom_out = &self.zoom_out;
        self.inner.modify(move |whole: &C::Value| {
            let intent = body(&zoom_in(whole))?;
            Ok(intent.map_update(|part| zoom_out(whole, part)))
        })
    }
}

impl<C, B, In, Out> VersionedAtomic for View<C, In, Out>
where
    C: VersionedAtomic,
    In: Fn(&C::Value) -> B,
    Out: Fn(&C::Value, B) -> C::Value,
{
    #[inline]
    fn read_with_version(&self) -> (B, Version) {
        let (whole, version) = self.inner.read_with_version();
        ((self.zoom_in)(&whole), version)
    }

    fn modify_with_version<'a, R, F>(&'a self, mut body: F) -> Result<Outcome<'a, R>, Restart>
    where
        R: 'a,
        F: FnMut(&B, Version) -> Flow<UpdateIntent<B, R>> + 'a,
    {
        let zoom_in = &self.zoom_in;
        let zoom_out = &self.zoom_out;
        self.inner
            .modify_with_version(move |whole: &C::Value, version| {
                let intent = body(&zoom_in(whole), version)?;
                Ok(intent.map_update(|part| zoom_out(whole, part)))
            })
    }
}

impl<C, B, In, Out> fmt::Debug for View<C, In, Out>
where
    C: Atomic,
    B: fmt::Debug,
    In: Fn(&C::Value) -> B,
    Out: Fn(&C::Value, B) -> C::Value,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("value", &self.read())
            .finish()
    }
}
