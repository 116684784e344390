// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Runs every `#[def_test]` in the binary; all of them pass.

use ctest::def_test;

const LIMIT: u32 = 42;

#[def_test]
fn limit_in_range() {
    assert!(LIMIT > 0);
    assert!(LIMIT < 100, "limit is {}", LIMIT);
}

#[def_test]
fn greeting() {
    let name = String::from("ctest");
    assert_eq_str!(format!("hello {name}"), "hello ctest");
}

ctest::main!();
