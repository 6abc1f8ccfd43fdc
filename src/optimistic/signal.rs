/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Control Signals
//!
//! Typed non-local control transfers for optimistic updates.
//!
//! A body passed to `modify` or a handler passed to `on_failure` returns a
//! [`Flow`]. Its error side carries a [`Signal`]:
//!
//! - [`Signal::Retry`] discards the current attempt. Inside a body it
//!   re-reads the cell and runs the body again; inside a failure handler it
//!   re-issues the whole `modify` and resolves the new outcome with the same
//!   handler. No public operation ever returns a retry signal to its caller.
//! - [`Signal::Restart`] aborts to the nearest enclosing [`restartable`]
//!   scope, which runs its body again from scratch. Every operation that can
//!   observe a restart hands it back as `Err(Restart)` so that `?` carries it
//!   outwards.
//!
//! Signals are control flow, not errors: neither type implements
//! `std::error::Error`.
//!
//! # Author
//!
//! Haixing Hu

use tracing::debug;

/// Result of a body or handler that may ask for a retry or a restart.
pub type Flow<T> = Result<T, Signal>;

/// A request to abandon the current computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a signal does nothing unless it is returned"]
pub enum Signal {
    /// Re-run the current optimistic attempt against a freshly read value.
    Retry,
    /// Re-run the body of the nearest enclosing `restartable` scope.
    Restart(Restart),
}

/// Token of a pending restart.
///
/// Only [`restart`] creates one and only [`restartable`] consumes one. A
/// `Restart` that reaches code outside any restartable scope cannot be
/// turned into a result, which is how the type system rejects restarts
/// raised with no scope to catch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a restart must propagate to an enclosing `restartable` scope"]
pub struct Restart {
    _private: (),
}

impl From<Restart> for Signal {
    #[inline]
    fn from(restart: Restart) -> Self {
        Signal::Restart(restart)
    }
}

/// Requests that the current attempt be discarded and tried again.
///
/// Valid inside a `modify` body and inside an `on_failure` or
/// `on_failure_with_result` handler. Never produces a value.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::{retry, update, Atomic, AtomicCell, restartable};
///
/// let cell = AtomicCell::new(0);
/// let n = restartable(|| {
///     cell.modify(|v| Ok(update(v + 1).with_result(v + 1)))?
///         .on_failure(retry)
/// });
/// assert_eq!(n, 1);
/// ```
#[inline]
pub fn retry<T>() -> Flow<T> {
    Err(Signal::Retry)
}

/// Requests that the nearest enclosing [`restartable`] scope run its body
/// again.
///
/// The return type adapts to the context: inside a body or handler it is a
/// [`Flow`], inside a restartable body it is a `Result<T, Restart>`.
#[inline]
pub fn restart<T, E>() -> Result<T, E>
where
    E: From<Restart>,
{
    Err(Restart { _private: () }.into())
}

/// Runs `body` until it completes without requesting a restart.
///
/// Any state the body builds during an aborted run is dropped before the
/// next run starts. Scopes nest: a restart is always caught by the innermost
/// scope whose body it was raised in.
///
/// # Parameters
///
/// * `body` - The computation to run. It may be invoked many times.
///
/// # Returns
///
/// The value produced by the first run that did not restart.
///
/// # Example
///
/// ```rust
/// use prism3_optimistic::{restart, restartable};
///
/// let mut runs = 0;
/// let value = restartable(|| {
///     runs += 1;
///     if runs < 3 {
///         return restart();
///     }
///     Ok(runs * 10)
/// });
/// assert_eq!(value, 30);
/// ```
pub fn restartable<T, F>(mut body: F) -> T
where
    F: FnMut() -> Result<T, Restart>,
{
    let mut restarts: u64 = 0;
    loop {
        match body() {
            Ok(value) => return value,
            Err(Restart { .. }) => {
                restarts += 1;
                debug!(restarts, "restartable scope re-running its body");
            }
        }
    }
}
