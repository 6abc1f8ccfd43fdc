/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Update Intents
//!
//! What a `modify` body decided: whether to replace the cell's value, and
//! what to return to the caller either way.
//!
//! # Author
//!
//! Haixing Hu

/// The decision produced by one evaluation of a `modify` body.
///
/// `update` is `Some(new_value)` to request a change, or `None` to leave the
/// cell untouched. `result` is returned to the caller whether or not the
/// update is committed.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::{no_update, update, UpdateIntent};
///
/// let grow: UpdateIntent<i32, &str> = update(5).with_result("grown");
/// assert_eq!(grow.update(), Some(&5));
///
/// let keep: UpdateIntent<i32, ()> = no_update();
/// assert!(keep.update().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct UpdateIntent<A, R> {
    update: Option<A>,
    result: R,
}

impl<A, R> UpdateIntent<A, R> {
    /// Creates an intent from its parts.
    ///
    /// # Parameters
    ///
    /// * `update` - The replacement value, or `None` for no change.
    /// * `result` - The value handed back to the caller.
    #[inline]
    pub fn new(update: Option<A>, result: R) -> Self {
        Self { update, result }
    }

    /// Replaces the result, keeping the requested update.
    #[inline]
    pub fn with_result<S>(self, result: S) -> UpdateIntent<A, S> {
        UpdateIntent {
            update: self.update,
            result,
        }
    }

    /// Gets the requested replacement value, if any.
    #[inline]
    pub fn update(&self) -> Option<&A> {
        self.update.as_ref()
    }

    /// Gets the result.
    #[inline]
    pub fn result(&self) -> &R {
        &self.result
    }

    /// Returns `true` if this intent asks for a change.
    #[inline]
    pub fn is_update(&self) -> bool {
        self.update.is_some()
    }

    /// Splits the intent into `(update, result)`.
    #[inline]
    pub fn into_parts(self) -> (Option<A>, R) {
        (self.update, self.result)
    }

    /// Translates the requested update, keeping the result.
    ///
    /// Views use this to rebuild a whole value from an updated part.
    #[inline]
    pub fn map_update<B, F>(self, f: F) -> UpdateIntent<B, R>
    where
        F: FnOnce(A) -> B,
    {
        UpdateIntent {
            update: self.update.map(f),
            result: self.result,
        }
    }
}

/// Requests that the cell hold `value`.
#[inline]
pub fn update<A>(value: A) -> UpdateIntent<A, ()> {
    UpdateIntent::new(Some(value), ())
}

/// Leaves the cell unchanged. A `modify` whose body returns this never
/// races and always succeeds.
#[inline]
pub fn no_update<A>() -> UpdateIntent<A, ()> {
    UpdateIntent::new(None, ())
}
