// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use std::cell::Cell;

use ctest::{
    Diagnostic, Runner, def_test,
    report::{Event, capture},
};
use pretty_assertions::assert_eq;

thread_local! {
    static PROBES: Cell<usize> = const { Cell::new(0) };
}

fn probe(value: i32) -> i32 {
    PROBES.set(PROBES.get() + 1);
    value
}

#[def_test]
fn add_returns_sum() {
    assert_eq!(2 + 2, 4);
    assert_eq!(2 + 2, 5);
}

#[def_test]
fn string_equality_check() {
    assert_eq_str!("a", "a");
}

#[def_test]
fn messages_and_strings() {
    let owned = String::from("left");
    assert_eq_str!(owned, "right", "compared {} bytes", owned.len());
    assert!(owned.is_empty(), "owned was {:?}", owned);
    ctest::assert!(!owned.is_empty());
}

#[def_test]
fn condition_evaluated_once() {
    assert!(probe(1) > 100);
}

#[def_test]
fn early_return_keeps_count() {
    assert!(false);
    if PROBES.get() == 0 {
        return;
    }
    assert!(false);
}

#[def_test]
fn counted_in_closures() {
    [1, -2, -3].iter().for_each(|x| assert!(*x > 0, "{} is negative", x));
}

#[def_test]
fn no_assertions() {}

fn failures(events: &[Event]) -> Vec<&Diagnostic> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::AssertionFailed(diag) => Some(diag),
            _ => None,
        })
        .collect()
}

#[test]
fn failed_assertions_are_counted_not_raised() {
    let (failed, events) = capture(add_returns_sum);
    assert_eq!(failed, 1);

    let diags = failures(&events);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].expression, "(2 + 2) == (5)");
    assert_eq!(diags[0].location.test_name, "add_returns_sum");
    assert!(diags[0].location.file.ends_with("def_test.rs"));
    assert_eq!(diags[0].message, "");
}

#[test]
fn passing_test_reports_nothing() {
    let (failed, events) = capture(string_equality_check);
    assert_eq!(failed, 0);
    assert!(events.is_empty());

    let (failed, events) = capture(no_assertions);
    assert_eq!(failed, 0);
    assert!(events.is_empty());
}

#[test]
fn message_variants_format_arguments() {
    let (failed, events) = capture(messages_and_strings);
    assert_eq!(failed, 2);

    let diags = failures(&events);
    assert_eq!(diags[0].expression, "string_compare(owned, \"right\") == Equal");
    assert_eq!(diags[0].message, "compared 4 bytes");
    assert_eq!(diags[1].message, "owned was \"left\"");
    assert!(diags[1].location.line > diags[0].location.line);
}

#[test]
fn condition_runs_exactly_once() {
    PROBES.set(0);
    let (failed, _) = capture(condition_evaluated_once);
    assert_eq!(failed, 1);
    assert_eq!(PROBES.get(), 1);
}

#[test]
fn early_return_leaves_body_only() {
    PROBES.set(0);
    let (failed, _) = capture(early_return_keeps_count);
    assert_eq!(failed, 1);
}

#[test]
fn closures_share_the_counter() {
    let (failed, events) = capture(counted_in_closures);
    assert_eq!(failed, 2);
    let messages: Vec<_> = failures(&events).iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["-2 is negative", "-3 is negative"]);
}

#[test]
fn example_registry_summary() {
    let registry = ctest::registry![add_returns_sum, string_equality_check];
    let (summary, events) = capture(|| Runner::new(&registry).run());
    let summary = summary.unwrap();

    assert_eq!(summary.fail_test_count, 1);
    assert_eq!(summary.pass_test_count, 1);
    assert_eq!(summary.test_count, 2);
    assert!(!summary.passed());

    let lines: Vec<_> = events
        .iter()
        .filter(|event| !matches!(event, Event::Summary(_)))
        .map(|event| event.render(false))
        .collect();
    assert_eq!(lines[0], "INFO: Running a total of 2 tests.\n\n");
    assert!(lines[1].contains("Assertion of '(2 + 2) == (5)' failed"));
    assert_eq!(lines[2], "💥 Test add_returns_sum failed 1 assertions!\n");
    assert_eq!(lines[3], "✅ Test string_equality_check passed.\n");
}
