/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Retry Policy
//!
//! How `Outcome::resolve_with` reacts to lost races: how many attempts it
//! may make in total and whether it backs off between them.
//!
//! # Author
//!
//! Haixing Hu

/// Configuration for resolving a failed outcome by retrying.
///
/// The attempt budget counts the attempt that produced the outcome being
/// resolved, so `RetryPolicy::at_most(1)` never retries.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::RetryPolicy;
///
/// let policy = RetryPolicy::at_most(8).with_backoff(false);
/// assert_eq!(policy.max_attempts(), Some(8));
/// assert!(!policy.backoff());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    backoff: bool,
}

impl RetryPolicy {
    /// Retries until the update commits, backing off between attempts.
    #[inline]
    pub const fn unbounded() -> Self {
        Self {
            max_attempts: None,
            backoff: true,
        }
    }

    /// Gives up after `attempts` attempts in total.
    ///
    /// # Parameters
    ///
    /// * `attempts` - The attempt budget. Values below 1 are treated as 1.
    #[inline]
    pub fn at_most(attempts: u32) -> Self {
        Self {
            max_attempts: Some(attempts.max(1)),
            backoff: true,
        }
    }

    /// Enables or disables backoff between attempts.
    #[inline]
    pub const fn with_backoff(mut self, backoff: bool) -> Self {
        self.backoff = backoff;
        self
    }

    /// Gets the attempt budget, or `None` if unbounded.
    #[inline]
    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Returns `true` if backoff between attempts is enabled.
    #[inline]
    pub const fn backoff(&self) -> bool {
        self.backoff
    }

    /// Returns `true` if no attempt may follow the `attempts` already made.
    #[inline]
    pub(crate) fn is_exhausted(&self, attempts: u32) -> bool {
        matches!(self.max_attempts, Some(max) if attempts >= max)
    }
}

impl Default for RetryPolicy {
    #[inline]
    fn default() -> Self {
        Self::unbounded()
    }
}
