use thiserror::Error;

mod automaton;
mod compile;
mod fragment;
mod matcher;
mod postfix;
mod validate;

#[cfg(feature = "emit")]
mod emit;

#[cfg(feature = "dot")]
mod dot;

pub use automaton::Automaton;
pub use compile::compile;
pub use fragment::{Fragment, Label, StateID, Transition};
pub use matcher::accepts;
pub use postfix::{to_postfix, Postfix, Token};
pub use validate::is_valid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The expression was rejected by [`is_valid`]. No automaton is built.
    #[error("invalid expression: `{0}`")]
    InvalidExpression(String),
    /// An operator found fewer fragments on the compilation stack than it needs.
    #[error("operator `{operator}` at postfix position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },
    /// The postfix sequence left more than one fragment on the stack.
    #[error("postfix sequence left {0} unconnected fragments")]
    UnconsumedFragments(usize),
}

/// Compiles `expression` and tests `text` against it in one go.
pub fn is_match(
    expression: impl AsRef<str>,
    text: impl AsRef<str>,
) -> Result<bool, CompileError> {
    Ok(compile(expression)?.accepts(text))
}

#[cfg(test)]
mod tests {
    use crate::{compile, is_match, is_valid, CompileError};
    use quickcheck::{quickcheck, Arbitrary, Gen};

    const EXPRESSION_CHARS: &[char] = &['a', 'b', '0', '(', ')', '*', '|', 'A'];
    const TEXT_CHARS: &[char] = &['a', 'b', '0'];

    fn sample(g: &mut Gen, chars: &[char], max_len: usize) -> String {
        let len = usize::arbitrary(g) % (max_len + 1);
        (0..len).filter_map(|_| g.choose(chars).copied()).collect()
    }

    #[derive(Clone, Debug)]
    struct Expression(String);

    impl Arbitrary for Expression {
        fn arbitrary(g: &mut Gen) -> Self {
            Expression(sample(g, EXPRESSION_CHARS, 10))
        }
    }

    #[derive(Clone, Debug)]
    struct Text(String);

    impl Arbitrary for Text {
        fn arbitrary(g: &mut Gen) -> Self {
            Text(sample(g, TEXT_CHARS, 6))
        }
    }

    quickcheck! {
        fn validation_is_deterministic(e: Expression) -> bool {
            is_valid(&e.0) == is_valid(&e.0)
        }

        fn invalid_expression_iff_rejected(e: Expression) -> bool {
            let rejected = matches!(compile(&e.0), Err(CompileError::InvalidExpression(_)));
            rejected == !is_valid(&e.0)
        }

        fn compiling_twice_agrees(e: Expression, t: Text) -> bool {
            match (compile(&e.0), compile(&e.0)) {
                (Ok(first), Ok(second)) => first.accepts(&t.0) == second.accepts(&t.0),
                (first, second) => first.err() == second.err(),
            }
        }
    }

    #[test]
    fn one_shot_matching() {
        assert_eq!(is_match("a*b", "aaaaab"), Ok(true));
        assert_eq!(is_match("a*b", "bb"), Ok(false));
        assert_eq!(
            is_match("a||b", "a"),
            Err(CompileError::InvalidExpression("a||b".into()))
        );
    }
}
