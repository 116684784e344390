// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Runs an explicit list of tests, one of which fails.

use ctest::def_test;

#[def_test]
fn add_returns_sum() {
    assert_eq!(2 + 2, 4);
    assert_eq!(2 + 2, 5, "2 + 2 is {}", 2 + 2);
}

#[def_test]
fn string_equality_check() {
    assert_eq_str!("a", "a");
}

#[def_test]
fn not_listed() {
    assert!(false);
}

ctest::main!(add_returns_sum, string_equality_check);
