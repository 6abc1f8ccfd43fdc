/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Optimistic Cells
//!
//! Lock-free cells whose values change only through optimistic updates.
//! A caller describes the change it wants as a pure function of the current
//! value; the cell runs that function against a snapshot and commits the
//! result with a single compare-and-swap. A lost race comes back as an
//! [`Outcome`] value, and the caller decides declaratively whether to retry,
//! give up, or keep the speculative result.
//!
//! # Features
//!
//! - Plain and versioned cells sharing one CAS retry loop
//! - Lens-based views that update part of a value through the whole cell
//! - Typed `retry` and `restart` signals instead of unwinding
//! - Bounded retry policies with spin/yield backoff
//!
//! # Author
//!
//! Haixing Hu

mod atomic_cell;
mod error;
mod intent;
mod outcome;
mod retry_policy;
mod signal;
mod slot;
mod traits;
mod versioned_cell;
mod view;

pub use atomic_cell::AtomicCell;
pub use error::ContentionError;
pub use intent::{
    no_update,
    update,
    UpdateIntent,
};
pub use outcome::Outcome;
pub use retry_policy::RetryPolicy;
pub use signal::{
    restart,
    restartable,
    retry,
    Flow,
    Restart,
    Signal,
};
pub use traits::{
    Atomic,
    Version,
    VersionedAtomic,
};
pub use versioned_cell::VersionedAtomicCell;
pub use view::View;
