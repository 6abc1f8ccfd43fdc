/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_optimistic::optimistic::{
    no_update,
    retry,
    update,
    Atomic,
    AtomicCell,
    VersionedAtomic,
    VersionedAtomicCell,
    View,
};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq)]
struct Account {
    balance: i64,
    owner: String,
}

fn first(pair: &(i32, String)) -> i32 {
    pair.0
}

fn with_first(pair: &(i32, String), first: i32) -> (i32, String) {
    (first, pair.1.clone())
}

#[test]
fn test_view_read() {
    let cell = AtomicCell::new((1, String::from("a")));
    let view = cell.view(first, with_first);
    assert_eq!(view.read(), 1);
}

// Updating through the view preserves the untouched component.
#[test]
fn test_view_modify_preserves_rest() {
    let cell = AtomicCell::new((1, String::from("a")));
    let view = cell.view(first, with_first);
    view.modify(|_| Ok(update(5)))
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(cell.read(), (5, String::from("a")));
    assert_eq!(view.read(), 5);
}

#[test]
fn test_view_no_update() {
    let cell = AtomicCell::new((1, String::from("a")));
    let view = cell.view(first, with_first);
    let seen = view
        .modify(|n| Ok(no_update().with_result(*n)))
        .unwrap()
        .ignore_failure();
    assert_eq!(seen, 1);
    assert_eq!(cell.read(), (1, String::from("a")));
}

// A write to the whole value invalidates an in-flight write through the view.
#[test]
fn test_view_shares_race_domain() {
    let cell = AtomicCell::new((0, String::from("a")));
    let view = cell.view(first, with_first);
    let mut calls = 0;
    let result = view
        .modify(|n| {
            calls += 1;
            if calls == 1 {
                cell.modify(|(n, _)| Ok(update((*n, String::from("b")))))
                    .unwrap()
                    .ignore_failure();
            }
            Ok(update(n + 1).with_result(calls))
        })
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(result, 2);
    assert_eq!(cell.read(), (1, String::from("b")));
}

#[test]
fn test_view_of_view() {
    let cell = AtomicCell::new(Account {
        balance: 10,
        owner: String::from("ann"),
    });
    let balance = cell.view(
        |a: &Account| a.balance,
        |a, balance| Account {
            balance,
            owner: a.owner.clone(),
        },
    );
    let is_positive = balance.view(|b: &i64| *b > 0, |b, positive| if positive { b.abs() } else { -b.abs() });
    assert!(is_positive.read());

    is_positive
        .modify(|_| Ok(update(false)))
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(balance.read(), -10);
    assert_eq!(cell.read().owner, "ann");
}

#[test]
fn test_view_helpers() {
    let cell = AtomicCell::new((3, String::from("x")));
    let view = cell.view(first, with_first);
    assert_eq!(view.get_and_update(|n| n * 2), 3);
    assert_eq!(view.update_and_get(|n| n + 1), 7);
    assert_eq!(cell.read(), (7, String::from("x")));
}

#[test]
fn test_versioned_view_forwards_version() {
    let cell = VersionedAtomicCell::new((1, String::from("a")));
    let view = cell.view(first, with_first);
    assert_eq!(view.read_with_version(), (1, 0));

    view.modify(|n| Ok(update(n + 1)))
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(view.read_with_version(), (2, 1));

    // Writes to the rest of the value still bump the view's version.
    cell.modify(|(n, _)| Ok(update((*n, String::from("b")))))
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(view.read_with_version(), (2, 2));
    assert_eq!(view.read_version(), cell.read_version());
}

#[test]
fn test_versioned_view_modify_with_version() {
    let cell = VersionedAtomicCell::new((0, String::from("a")));
    let view = cell.view(first, with_first);
    for _ in 0..3 {
        view.modify_with_version(|_, version| Ok(update(version as i32 * 10)))
            .unwrap()
            .on_failure(retry)
            .unwrap();
    }
    assert_eq!(cell.read_with_version(), ((20, String::from("a")), 3));
}

#[test]
fn test_shared_ownership_view() {
    let cell = Arc::new(AtomicCell::new((0, String::from("counter"))));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let view = View::new(Arc::clone(&cell), first, with_first);
            thread::spawn(move || {
                for _ in 0..250 {
                    view.update_and_get(|n| n + 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cell.read(), (1000, String::from("counter")));
}

#[test]
fn test_view_debug() {
    let cell = AtomicCell::new((4, String::from("z")));
    let view = cell.view(first, with_first);
    assert_eq!(format!("{:?}", view), "View { value: 4 }");
    assert_eq!(view.inner().read().1, "z");
}
