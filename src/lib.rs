/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-optimistic
//!
//! Misuse-resistant optimistic updates over lock-free atomic cells.
//!
//! A cell holds one shared value. It can be read at any time, and changed
//! only through `modify`, which runs a caller-supplied body against the
//! current value and commits the body's decision with a compare-and-swap.
//! The CAS itself is never exposed.
//!
//! ## Design Goals
//!
//! - **No lost updates**: every change commits through one CAS on one slot
//! - **Explicit races**: a lost race is an `Outcome` the caller must resolve
//! - **Declarative recovery**: retry, give up or keep the candidate result
//! - **Composable**: views update part of a value without a new race domain
//! - **Non-blocking**: no locks, no waiting on other threads
//!
//! ## Features
//!
//! - Cells: `AtomicCell`, `VersionedAtomicCell`
//! - Views: `View`, created with `Atomic::view` or `View::new`
//! - Signals: `retry`, `restart`, `restartable`
//! - Resolution: `Outcome::on_failure`, `Outcome::on_failure_with_result`,
//!   `Outcome::ignore_failure`, `Outcome::resolve_with`
//!
//! ## Example
//!
//! ```rust
//! use prism3_optimistic::{
//!     no_update, restart, restartable, retry, update, Atomic, AtomicCell,
//! };
//!
//! let stock = AtomicCell::new(3u32);
//!
//! // Take one item if any are left; report whether we got one.
//! let took = restartable(|| {
//!     stock
//!         .modify(|&n| {
//!             if n == 0 {
//!                 return Ok(no_update().with_result(false));
//!             }
//!             Ok(update(n - 1).with_result(true))
//!         })?
//!         .on_failure(retry)
//! });
//! assert!(took);
//! assert_eq!(stock.read(), 2);
//!
//! // Give up the whole block and start over if the stock ran out meanwhile.
//! let mut runs = 0;
//! let left = restartable(|| {
//!     runs += 1;
//!     let seen = stock.read();
//!     stock
//!         .modify(|&n| Ok(update(n.saturating_sub(1)).with_result(n)))?
//!         .on_failure(|| if runs < 3 { restart() } else { retry() })?;
//!     Ok(seen)
//! });
//! assert_eq!(left, 2);
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod optimistic;

// Re-export all cell types, signals and traits
pub use optimistic::{
    no_update,
    restart,
    restartable,
    retry,
    update,
    Atomic,
    AtomicCell,
    ContentionError,
    Flow,
    Outcome,
    Restart,
    RetryPolicy,
    Signal,
    UpdateIntent,
    Version,
    VersionedAtomic,
    VersionedAtomicCell,
    View,
};
