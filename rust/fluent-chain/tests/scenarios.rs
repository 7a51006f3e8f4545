mod common;

use common::SpyHandler;
use fluent_chain::*;
use std::{num::ParseIntError, rc::Rc};

#[test]
fn booleans() {
    assert_that(true).is_true();
    assert_that(false).is_false();
    should_fail_with_message!(assert_that(false).is_true(), "expected: true but was: false");
}

#[test]
fn collection_membership() {
    assert_that(vec![1, 2, 3]).contains([3, 1]);
    should_fail_with_message!(
        assert_that(vec![1, 2, 3]).contains([1, 2, 4]),
        "expecting subject to contain: [1, 2, 4] but misses: [4]"
    );
}

#[test]
fn ordering_of_floats() {
    assert_that(20.0).is_greater_than(10.0);
    should_fail_with_message!(assert_that(15.0).is_greater_than(15.0), "greater than: 15.0 but was: 15.0");
}

#[test]
fn typed_throw_returns_the_caught_error() {
    let caught = assert_that(|| "twelve".parse::<u32>())
        .throws_error::<ParseIntError>()
        .with_message("invalid digit found in string")
        .into_subject();

    let caught = caught.and_then(|e| e.downcast_ref::<ParseIntError>().cloned());
    assert_that(caught).is_equal_to("twelve".parse::<u32>().err());
}

#[test]
fn text_that_does_not_contain_a_word() {
    assert_that("threhterj").does_not_contain("the");
    should_fail_with_message!(
        assert_that("threhterj").contains("the"),
        "expecting subject to contain: \"the\" but was: \"threhterj\""
    );
}

#[test]
fn multiset_scenarios() {
    assert_that(vec![5, 6, 7]).contains_exactly_in_any_order([5, 7, 6]);

    let spy = Rc::new(SpyHandler::default());
    vec![5, 6, 7].assert_with(spy.clone()).contains_exactly_in_any_order([5, 6]);
    vec![5, 6, 7].assert_with(spy.clone()).contains_exactly_in_any_order([5, 6, 7, 7]);
    vec![5, 6, 7].assert_with(spy.clone()).contains_exactly_in_any_order([5, 9, 7, 6]);

    let messages = spy.messages();
    assert_eq!(messages.len(), 3);
    assert_that(messages[0].as_str()).contains("in excess:\n  [7]");
    assert_that(messages[1].as_str()).contains("but misses:\n  [7]");
    assert_that(messages[2].as_str()).contains("but misses:\n  [9]");
}

#[test]
fn contiguous_and_interleaved_runs() {
    let bits = [0, 1, 0, 1, 1, 0];

    assert_that(bits)
        .contains_sequence([1, 1])
        .does_not_contain_sequence([1, 1, 1])
        .contains_interleaved_sequence([1, 0, 0])
        .does_not_contain_interleaved_sequence([1, 1, 1, 1]);
}

#[test]
fn invalid_range_panics_whatever_the_handler() {
    assert_that(|| {
        let _ = 9i32.assert_with(Rc::new(IgnoringHandler)).is_in_range(10, 8);
    })
    .throws_exactly::<PanicError>()
    .with_message_containing("10")
    .with_message_containing("8");

    assert_that(|| {
        let _ = assert_that(-3).is_not_in_range(10, 8);
    })
    .throws();
}

#[test]
fn custom_message_comes_first() {
    let spy = Rc::new(SpyHandler::default());

    "abc".assert_with(spy.clone()).described_as("user name").has_size(5);

    assert_that(spy.last()).is_not_null();
    assert_that(spy.last().unwrap_or_default().as_str())
        .starts_with("[user name]\nassert_that().has_size() expectation failed");
}

#[test]
fn soft_assertions_report_every_failure() {
    let soft = SoftAssertions::new();

    soft.that("threhterj").contains("the");
    soft.that(vec![1, 2]).has_size(3);
    soft.that(2.5).is_negative();

    let error = soft.into_result().err();
    assert_that(error.as_ref().map(|e| e.failures.len())).is_equal_to(Some(3));
    assert_that(error.map(|e| e.to_string()).unwrap_or_default().as_str()).starts_with("3 assertion(s) failed:");
}
