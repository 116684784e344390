// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use ctest::{Registry, Runner, def_test, report::capture};

#[def_test]
fn zeta_declared_first() {
    assert!(1 + 1 == 2);
}

#[def_test]
fn alpha_declared_second() {
    assert_eq!(1, 2);
    assert_eq!(3, 4);
}

mod nested {
    use ctest::def_test;

    #[def_test]
    fn in_module() {
        assert_eq_str!("x", "x");
    }
}

#[test]
fn collected_in_declaration_order() {
    let registry = Registry::collected();
    let names: Vec<_> = registry.iter().map(|case| case.name).collect();
    assert_eq!(names, ["zeta_declared_first", "alpha_declared_second", "in_module"]);

    let modules: Vec<_> = registry.iter().map(|case| case.module).collect();
    assert_eq!(modules[2], "collected::nested");
}

#[test]
fn collected_run_counts_each_test_once() {
    let registry = Registry::collected();
    let (summary, _) = capture(|| Runner::new(&registry).run());
    let summary = summary.unwrap();
    assert_eq!(summary.test_count, 3);
    assert_eq!(summary.fail_test_count, 1);
    assert_eq!(summary.pass_test_count, 2);
}
