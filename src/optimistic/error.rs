/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Errors
//!
//! # Author
//!
//! Haixing Hu

use thiserror::Error;

/// Error returned when a bounded retry policy gives up.
///
/// Lost races are not errors on their own: a single failed attempt is an
/// `Outcome::Failure`. This error only appears when a caller resolves an
/// outcome with a `RetryPolicy` that caps the number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContentionError {
    /// Every permitted attempt lost its compare-and-swap.
    #[error("update still contended after {attempts} attempts")]
    Exhausted {
        /// Number of attempts made, including the first one.
        attempts: u32,
    },
}

impl ContentionError {
    /// Gets the number of attempts made before giving up.
    #[inline]
    pub fn attempts(&self) -> u32 {
        match self {
            ContentionError::Exhausted { attempts } => *attempts,
        }
    }
}
