/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Outcomes
//!
//! The result of one optimistic-update attempt and the combinators that
//! decide what to do when the attempt lost a race.
//!
//! A lost race is an ordinary value, never a panic or an error: the caller
//! must resolve every [`Outcome`] explicitly, with [`Outcome::on_failure`],
//! [`Outcome::on_failure_with_result`], [`Outcome::ignore_failure`] or
//! [`Outcome::resolve_with`].
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;

use crossbeam_utils::Backoff;
use tracing::debug;

use crate::optimistic::error::ContentionError;
use crate::optimistic::retry_policy::RetryPolicy;
use crate::optimistic::signal::{
    Flow,
    Restart,
    Signal,
};

/// The result of one optimistic-update attempt.
///
/// # Candidate results
///
/// A failure carries the result the body produced for the attempt that lost
/// the race. That update was never applied: the candidate describes a state
/// the cell never held. [`Outcome::on_failure_with_result`] and
/// [`Outcome::ignore_failure`] hand it back on purpose, for callers whose
/// result stays meaningful whether or not the update took effect. Treating
/// it as proof of a committed update is a bug.
#[must_use = "an outcome must be resolved; a failed attempt changed nothing"]
pub enum Outcome<'a, R> {
    /// The update committed, or no update was requested.
    Success(R),
    /// A concurrent update won the race between the read and the CAS.
    Failure {
        /// Runs the whole attempt again against a fresh read.
        retry: Box<dyn FnOnce() -> Result<Outcome<'a, R>, Restart> + 'a>,
        /// The result the body produced for the lost attempt.
        candidate: R,
    },
}

impl<'a, R> Outcome<'a, R> {
    #[inline]
    pub(crate) fn failure<F>(retry: F, candidate: R) -> Self
    where
        F: FnOnce() -> Result<Outcome<'a, R>, Restart> + 'a,
    {
        Outcome::Failure {
            retry: Box::new(retry),
            candidate,
        }
    }

    /// Returns `true` if the attempt succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` if the attempt lost a race.
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Resolves the outcome, calling `handler` if the attempt failed.
    ///
    /// If the handler signals [`Signal::Retry`], the whole attempt is issued
    /// again and its outcome is resolved with the same handler. Any value the
    /// handler returns normally becomes the final result.
    ///
    /// # Parameters
    ///
    /// * `handler` - Called once per failed attempt.
    ///
    /// # Returns
    ///
    /// The final result, or `Err(Restart)` if the handler or a re-issued
    /// body requested a restart.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_optimistic::{restartable, retry, update, Atomic, AtomicCell};
    ///
    /// let cell = AtomicCell::new(1);
    /// let doubled = restartable(|| {
    ///     cell.modify(|v| Ok(update(v * 2).with_result(v * 2)))?
    ///         .on_failure(retry)
    /// });
    /// assert_eq!(doubled, 2);
    /// ```
    pub fn on_failure<F>(self, mut handler: F) -> Result<R, Restart>
    where
        F: FnMut() -> Flow<R>,
    {
        let mut outcome = self;
        loop {
            match outcome {
                Outcome::Success(result) => return Ok(result),
                Outcome::Failure { retry, .. } => match handler() {
                    Ok(result) => return Ok(result),
                    Err(Signal::Retry) => outcome = retry()?,
                    Err(Signal::Restart(restart)) => return Err(restart),
                },
            }
        }
    }

    /// Like [`Outcome::on_failure`], but the handler receives the candidate
    /// result of the failed attempt.
    ///
    /// The handler may accept the candidate, replace it, or signal
    /// [`Signal::Retry`] to issue the attempt again.
    pub fn on_failure_with_result<F>(self, mut handler: F) -> Result<R, Restart>
    where
        F: FnMut(R) -> Flow<R>,
    {
        let mut outcome = self;
        loop {
            match outcome {
                Outcome::Success(result) => return Ok(result),
                Outcome::Failure { retry, candidate } => match handler(candidate) {
                    Ok(result) => return Ok(result),
                    Err(Signal::Retry) => outcome = retry()?,
                    Err(Signal::Restart(restart)) => return Err(restart),
                },
            }
        }
    }

    /// Returns the result of this single attempt, committed or not.
    ///
    /// Never retries. On failure the candidate result is returned even
    /// though its update was not applied.
    #[inline]
    pub fn ignore_failure(self) -> R {
        match self {
            Outcome::Success(result) => result,
            Outcome::Failure { candidate, .. } => candidate,
        }
    }

    /// Resolves the outcome by retrying under `policy`.
    ///
    /// # Parameters
    ///
    /// * `policy` - Attempt budget and backoff setting. The attempt that
    ///   produced this outcome counts against the budget.
    ///
    /// # Returns
    ///
    /// `Ok(Ok(result))` once an attempt succeeds, `Ok(Err(_))` when the
    /// budget runs out, or `Err(Restart)` if a re-issued body requested a
    /// restart.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_optimistic::{restartable, update, Atomic, AtomicCell, RetryPolicy};
    ///
    /// let cell = AtomicCell::new(0);
    /// let policy = RetryPolicy::at_most(16);
    /// let committed = restartable(|| {
    ///     cell.modify(|v| Ok(update(v + 1)))?.resolve_with(&policy)
    /// });
    /// assert!(committed.is_ok());
    /// ```
    pub fn resolve_with(self, policy: &RetryPolicy) -> Result<Result<R, ContentionError>, Restart> {
        let backoff = Backoff::new();
        let mut attempts: u32 = 1;
        let mut outcome = self;
        loop {
            match outcome {
                Outcome::Success(result) => return Ok(Ok(result)),
                Outcome::Failure { retry, .. } => {
                    if policy.is_exhausted(attempts) {
                        debug!(attempts, "retry policy exhausted; giving up");
                        return Ok(Err(ContentionError::Exhausted { attempts }));
                    }
                    if policy.backoff() {
                        backoff.snooze();
                    }
                    attempts = attempts.saturating_add(1);
                    outcome = retry()?;
                }
            }
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Outcome<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(result) => f.debug_tuple("Success").field(result).finish(),
            Outcome::Failure { candidate, .. } => f
                .debug_struct("Failure")
                .field("candidate", candidate)
                .finish_non_exhaustive(),
        }
    }
}
