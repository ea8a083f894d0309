use crate::fragment::Fragment;
use crate::postfix::{to_postfix, Postfix, Token};
use crate::validate::is_valid;
use crate::{Automaton, CompileError};

/// Evaluates a postfix sequence on a stack of fragments.
struct Builder {
    stack: Vec<Fragment>,
}

impl Builder {
    fn new() -> Self {
        Self { stack: Vec::new() }
    }

    fn top_fragment(&mut self, token: Token, position: usize) -> Result<Fragment, CompileError> {
        self.stack.pop().ok_or(CompileError::MissingOperand {
            operator: token.as_char(),
            position,
        })
    }

    // right-hand side is on top of the stack
    fn top_pair(
        &mut self,
        token: Token,
        position: usize,
    ) -> Result<(Fragment, Fragment), CompileError> {
        let b = self.top_fragment(token, position)?;
        let a = self.top_fragment(token, position)?;
        Ok((a, b))
    }

    fn step(&mut self, token: Token, position: usize) -> Result<(), CompileError> {
        let fragment = match token {
            Token::Symbol(c) => Fragment::literal(c),
            Token::Star => Fragment::star(&self.top_fragment(token, position)?),
            Token::Concat => {
                let (a, b) = self.top_pair(token, position)?;
                Fragment::concat(&a, &b)
            }
            Token::Union => {
                let (a, b) = self.top_pair(token, position)?;
                Fragment::union(&a, &b)
            }
        };
        self.stack.push(fragment);
        Ok(())
    }

    fn finalize(mut self) -> Result<Fragment, CompileError> {
        // an empty stack means there was nothing to build, e.g. `()`
        let fragment = self.stack.pop().unwrap_or_else(Fragment::epsilon);
        if self.stack.is_empty() {
            Ok(fragment)
        } else {
            Err(CompileError::UnconsumedFragments(self.stack.len() + 1))
        }
    }
}

/// Applies the Thompson construction to a postfix sequence.
///
/// An empty sequence yields the fragment accepting only the empty string.
pub(crate) fn build(postfix: &Postfix) -> Result<Fragment, CompileError> {
    let mut builder = Builder::new();
    for (position, &token) in postfix.into_iter().enumerate() {
        builder.step(token, position)?;
    }
    builder.finalize()
}

/// Compiles an expression into an [`Automaton`].
///
/// Fails with [`CompileError::InvalidExpression`] when [`is_valid`] rejects
/// the input; construction is not attempted in that case.
pub fn compile(expression: impl AsRef<str>) -> Result<Automaton, CompileError> {
    let expression = expression.as_ref();
    if !is_valid(expression) {
        log::debug!("rejected expression {expression:?}");
        return Err(CompileError::InvalidExpression(expression.to_string()));
    }

    let postfix = to_postfix(expression);
    let automaton = Automaton::from(build(&postfix)?);
    log::debug!(
        "compiled {expression:?} (postfix `{postfix}`): {} states, {} transitions",
        automaton.state_count(),
        automaton.transitions().len()
    );
    Ok(automaton)
}
