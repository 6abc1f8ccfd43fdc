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
};

#[derive(Debug, Clone, PartialEq)]
struct TestData {
    value: i32,
    name: String,
}

#[test]
fn test_new() {
    let cell = AtomicCell::new(TestData {
        value: 42,
        name: "test".to_string(),
    });
    assert_eq!(cell.read().value, 42);
    assert_eq!(cell.read().name, "test");
}

#[test]
fn test_default() {
    let cell: AtomicCell<i32> = AtomicCell::default();
    assert_eq!(cell.read(), 0);
}

#[test]
fn test_from() {
    let cell = AtomicCell::from(String::from("hello"));
    assert_eq!(cell.read(), "hello");
}

#[test]
fn test_into_inner() {
    let cell = AtomicCell::new(vec![1, 2, 3]);
    cell.modify(|v| {
        let mut next = v.clone();
        next.push(4);
        Ok(update(next))
    })
    .unwrap()
    .ignore_failure();
    assert_eq!(cell.into_inner(), vec![1, 2, 3, 4]);
}

#[test]
fn test_modify_success() {
    let cell = AtomicCell::new(10);
    let outcome = cell
        .modify(|v| Ok(update(v + 5).with_result(*v)))
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.ignore_failure(), 10);
    assert_eq!(cell.read(), 15);
}

#[test]
fn test_modify_result_without_update() {
    let cell = AtomicCell::new(7);
    let doubled = cell
        .modify(|v| Ok(no_update().with_result(v * 2)))
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(doubled, 14);
    assert_eq!(cell.read(), 7);
}

// A no-update body never races, even when the value changes under it.
#[test]
fn test_no_update_never_fails() {
    let cell = AtomicCell::new(0);
    let mut interfered = false;
    let outcome = cell
        .modify(|_| {
            if !interfered {
                interfered = true;
                cell.modify(|v| Ok(update(v + 1))).unwrap().ignore_failure();
            }
            Ok(no_update())
        })
        .unwrap();
    assert!(outcome.is_success());
    drop(outcome);
    assert_eq!(cell.read(), 1);
}

#[test]
fn test_body_retry_rereads() {
    let cell = AtomicCell::new(1);
    let mut seen = Vec::new();
    let result = cell
        .modify(|v| {
            seen.push(*v);
            if seen.len() == 1 {
                cell.modify(|v| Ok(update(v * 10))).unwrap().ignore_failure();
                return retry();
            }
            Ok(update(v + 1).with_result(*v))
        })
        .unwrap()
        .on_failure(retry)
        .unwrap();
    assert_eq!(result, 10);
    assert_eq!(seen, vec![1, 10]);
    assert_eq!(cell.read(), 11);
}

#[test]
fn test_update_to_equal_value_commits() {
    let cell = AtomicCell::new(3);
    let outcome = cell.modify(|v| Ok(update(*v))).unwrap();
    assert!(outcome.is_success());
    assert_eq!(cell.read(), 3);
}

#[test]
fn test_sequential_fold() {
    let cell = AtomicCell::new(0i64);
    let deltas = [Some(3), None, Some(-1), Some(10), None];
    let mut expected = 0i64;
    for delta in deltas {
        cell.modify(|v| {
            Ok(match delta {
                Some(d) => update(v + d),
                None => no_update(),
            })
        })
        .unwrap()
        .on_failure(retry)
        .unwrap();
        if let Some(d) = delta {
            expected += d;
        }
    }
    assert_eq!(cell.read(), expected);
}

#[test]
fn test_get_and_update() {
    let cell = AtomicCell::new(5);
    let old = cell.get_and_update(|v| v * 3);
    assert_eq!(old, 5);
    assert_eq!(cell.read(), 15);
}

#[test]
fn test_update_and_get() {
    let cell = AtomicCell::new(String::from("a"));
    let new = cell.update_and_get(|s| format!("{}b", s));
    assert_eq!(new, "ab");
    assert_eq!(cell.read(), "ab");
}

#[test]
fn test_debug_display() {
    let cell = AtomicCell::new(42);
    assert_eq!(format!("{:?}", cell), "AtomicCell { value: 42 }");
    assert_eq!(format!("{}", cell), "42");
}
