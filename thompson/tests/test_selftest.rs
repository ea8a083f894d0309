use thompson::selftest::{self, Expect, CASES};
use thompson::{compile, CompileError};

#[ctor::ctor]
fn init() {
    env_logger::init();
}

#[test]
fn test_every_case_passes() {
    let report = selftest::run(CASES);
    for result in report.failures() {
        eprintln!("{result}");
    }
    assert!(report.is_success(), "{report}");
    assert_eq!(report.passed(), CASES.len());
    assert_eq!(report.to_string(), "[self-test] ALL 100 TESTS PASSED");
}

#[test]
fn test_invalid_rows_never_build() {
    for case in CASES.iter().filter(|c| c.expect == Expect::Invalid) {
        assert_eq!(
            compile(case.expression),
            Err(CompileError::InvalidExpression(case.expression.to_string()))
        );
    }
}

#[test]
fn test_automaton_listing() {
    let automaton = compile("a|b").unwrap();
    assert_eq!(
        automaton.to_string(),
        "\
(0, ε, 1)
(1, a, 2)
(2, ε, 5)
(0, ε, 3)
(3, b, 4)
(4, ε, 5)
Start state: 0  |  Final state: 5"
    );
}
