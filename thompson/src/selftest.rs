//! A fixed table of expressions and strings with known verdicts, together
//! with a runner that checks them against the current build.

use std::fmt::{Display, Formatter};

use crate::{compile, Automaton, CompileError};

/// The verdict a [`Case`] expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expect {
    /// The text is in the language of the expression.
    Accept,
    /// The text is not in the language of the expression.
    Reject,
    /// The expression must be refused before an automaton is built.
    Invalid,
}

/// One row of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Case {
    /// Expression to compile.
    pub expression: &'static str,
    /// Text to match against the compiled expression.
    pub text: &'static str,
    /// What should happen.
    pub expect: Expect,
}

const fn accept(expression: &'static str, text: &'static str) -> Case {
    Case {
        expression,
        text,
        expect: Expect::Accept,
    }
}

const fn reject(expression: &'static str, text: &'static str) -> Case {
    Case {
        expression,
        text,
        expect: Expect::Reject,
    }
}

const fn invalid(expression: &'static str, text: &'static str) -> Case {
    Case {
        expression,
        text,
        expect: Expect::Invalid,
    }
}

const NESTED: &str = "(0|(1(01*(00)*0)*1)*)*";

/// Every case the console front-end runs on start-up.
pub const CASES: &[Case] = &[
    reject("ab", "a"),
    reject("ab", ""),
    reject("ab", "aa"),
    reject("ab", "aaa"),
    accept("ab", "ab"),
    reject("ab", "b"),
    reject("ab", "bb"),
    accept("a", "a"),
    reject("a", ""),
    reject("a", "aa"),
    reject("a", "aaa"),
    reject("a", "ab"),
    reject("a", "b"),
    reject("a", "bb"),
    accept("a*", ""),
    accept("a*", "a"),
    accept("a*", "aa"),
    accept("a*", "aaa"),
    reject("a*", "ab"),
    reject("a*", "b"),
    reject("a*", "bb"),
    reject("a*b", ""),
    reject("a*b", "a"),
    reject("a*b", "aa"),
    reject("a*b", "aaa"),
    accept("a*b", "ab"),
    accept("a*b", "b"),
    reject("a*b", "bb"),
    accept("a*b", "aaaaab"),
    reject("a|b", ""),
    accept("a|b", "a"),
    reject("a|b", "aa"),
    reject("a|b", "aaa"),
    reject("a|b", "ab"),
    accept("a|b", "b"),
    accept("a*|b", ""),
    accept("a*|b", "a"),
    accept("a*|b", "aaa"),
    accept("a*|b", "b"),
    reject("a*|b", "ba"),
    reject("a*|b", "ab"),
    accept("a(ab)*c", "aababababc"),
    reject("a(ab)*c", "aababababcc"),
    accept("a(ab)*c", "ac"),
    reject("a(ab)*c", ""),
    reject("a(ab)*c", "c"),
    accept("(a*)|b", ""),
    accept("(a*)|b", "a"),
    accept("(a*)|b", "aa"),
    accept("(a*)|b", "aaa"),
    reject("(a*)|b", "ab"),
    accept("(a*)|b", "b"),
    reject("(a*)|b", "bb"),
    accept("((a*b)*c)|b", "aaaaabaabc"),
    accept("((a*b)*c)|b", "c"),
    reject("((a*b)*c)|b", "ca"),
    reject("((a*b)*c)|b", "cb"),
    reject("((a*b)*c)|b", "cc"),
    reject("((a*b)*c)|b", ""),
    accept("a*b*c*", "abb"),
    accept("a*b*c*", "aaaaabb"),
    accept("a*b*c*", "aaaaac"),
    accept("a*b*c*", "aaaaabbccccc"),
    accept("a*b*c*", "ccc"),
    accept("(a*)", "a"),
    accept("(a*)", "aaa"),
    accept("(a*)b", "aaab"),
    accept("b(a*)", "b"),
    accept("b(a*)", "ba"),
    accept("()", ""),
    reject("()", "a"),
    accept("(c|b(a*))*", "cccbbaaaaabab"),
    accept("(c|b(a*))*", "cccbbaaaaababc"),
    accept("(c|(a))*", "caaaaaccc"),
    accept(NESTED, ""),
    accept(NESTED, "0"),
    accept(NESTED, "00"),
    accept(NESTED, "11"),
    accept(NESTED, "000"),
    accept(NESTED, "011"),
    accept(NESTED, "110"),
    accept(NESTED, "0000"),
    accept(NESTED, "0011"),
    accept(NESTED, "0110"),
    accept(NESTED, "1001"),
    accept(NESTED, "1100"),
    accept(NESTED, "1111"),
    accept(NESTED, "00000"),
    reject(NESTED, "00001"),
    reject(NESTED, "0011101"),
    accept(NESTED, "1011100000011100000110111000000111000001"),
    invalid("((a*)", ""),
    invalid("(a*))", ""),
    invalid("|a", ""),
    invalid("|(a)", ""),
    invalid("a**", "aaaa"),
    invalid("a**", ""),
    invalid("a**", "b"),
    invalid("a||b", "a"),
    invalid("a||b", "b"),
];

/// The result of running one [`Case`].
#[derive(Clone, Debug)]
pub struct CaseResult {
    /// The case that was run.
    pub case: Case,
    /// The compiled automaton and its verdict, or why compiling failed.
    pub outcome: Result<(Automaton, bool), CompileError>,
}

impl CaseResult {
    /// Whether the outcome is the one the case expects.
    pub fn passed(&self) -> bool {
        match (&self.outcome, self.case.expect) {
            (Ok((_, verdict)), Expect::Accept) => *verdict,
            (Ok((_, verdict)), Expect::Reject) => !*verdict,
            (Err(CompileError::InvalidExpression(_)), Expect::Invalid) => true,
            _ => false,
        }
    }

    /// The automaton, if the expression compiled.
    pub fn automaton(&self) -> Option<&Automaton> {
        self.outcome.as_ref().ok().map(|(automaton, _)| automaton)
    }
}

impl Display for CaseResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = if self.passed() { "OK" } else { "FAILED" };
        match &self.outcome {
            Ok((_, verdict)) => write!(
                f,
                "{} : {} : {verdict} : {status}",
                self.case.expression, self.case.text
            ),
            Err(err) => write!(
                f,
                "{} : {} : {err} : {status}",
                self.case.expression, self.case.text
            ),
        }
    }
}

/// The results of a whole table.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// One entry per case, in table order.
    pub results: Vec<CaseResult>,
}

impl Report {
    /// Cases whose outcome did not match the expectation.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> + '_ {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Number of cases that passed.
    pub fn passed(&self) -> usize {
        self.results.len() - self.failed()
    }

    /// Number of cases that failed.
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// Number of cases whose expression did not compile.
    pub fn invalid(&self) -> usize {
        self.results.iter().filter(|r| r.automaton().is_none()).count()
    }

    /// True if every case passed.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let failed = self.failed();
        if failed > 0 {
            write!(f, "[self-test] {failed}/{} FAILED", self.results.len())
        } else {
            write!(f, "[self-test] ALL {} TESTS PASSED", self.results.len())
        }
    }
}

/// Runs a single case.
pub fn run_case(case: Case) -> CaseResult {
    let outcome = compile(case.expression).map(|automaton| {
        let verdict = automaton.accepts(case.text);
        (automaton, verdict)
    });
    let result = CaseResult { case, outcome };
    if !result.passed() {
        log::warn!("self-test case failed: {result}");
    }
    result
}

/// Runs every case of `cases`, in order.
pub fn run(cases: &[Case]) -> Report {
    Report {
        results: cases.iter().copied().map(run_case).collect(),
    }
}
