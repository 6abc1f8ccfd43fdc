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
    update,
    UpdateIntent,
};

#[test]
fn test_update() {
    let intent = update(5);
    assert!(intent.is_update());
    assert_eq!(intent.update(), Some(&5));
    assert_eq!(intent.result(), &());
}

#[test]
fn test_no_update() {
    let intent: UpdateIntent<String, ()> = no_update();
    assert!(!intent.is_update());
    assert_eq!(intent.update(), None);
}

#[test]
fn test_with_result_keeps_update() {
    let intent = update("new").with_result(42);
    assert_eq!(intent.into_parts(), (Some("new"), 42));

    let intent = no_update::<&str>().with_result("kept");
    assert_eq!(intent.into_parts(), (None, "kept"));
}

#[test]
fn test_new() {
    let intent = UpdateIntent::new(Some(1u8), "r");
    assert_eq!(intent, update(1u8).with_result("r"));
}

#[test]
fn test_map_update() {
    let intent = update(3).with_result('x').map_update(|n| (n, "rest"));
    assert_eq!(intent.into_parts(), (Some((3, "rest")), 'x'));

    let intent = no_update::<i32>().with_result('y').map_update(|n| n * 2);
    assert_eq!(intent.into_parts(), (None, 'y'));
}
