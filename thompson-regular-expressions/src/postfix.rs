use std::fmt::{Display, Formatter};

/// Binary and unary operators of the expression syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Operator {
    Concat,
    Union,
    Star,
}

impl Operator {
    /// Higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            Operator::Union => 0,
            Operator::Concat => 1,
            Operator::Star => 2,
        }
    }

    fn token(self) -> Token {
        match self {
            Operator::Concat => Token::Concat,
            Operator::Union => Token::Union,
            Operator::Star => Token::Star,
        }
    }
}

/// A single element of a postfix sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Symbol(char),
    Concat,
    Union,
    Star,
}

impl Token {
    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Concat => '.',
            Token::Union => '|',
            Token::Star => '*',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Infix {
    Operand(char),
    Operator(Operator),
    Open,
    Close,
}

impl Infix {
    fn scan(c: char) -> Self {
        match c {
            '(' => Infix::Open,
            ')' => Infix::Close,
            '*' => Infix::Operator(Operator::Star),
            '|' => Infix::Operator(Operator::Union),
            c => Infix::Operand(c),
        }
    }

    fn as_char(self) -> char {
        match self {
            Infix::Operand(c) => c,
            Infix::Operator(op) => op.token().as_char(),
            Infix::Open => '(',
            Infix::Close => ')',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Open,
    Operator(Operator),
}

/// Makes concatenation explicit.
///
/// After every character other than `(` and `|` a concatenation operator is
/// inserted, unless the next character is `*`, `|` or `)` (or there is none).
fn insert_concatenation(expression: &str) -> Vec<Infix> {
    let mut symbols = Vec::with_capacity(expression.len() * 2);
    let mut chars = expression.chars().peekable();

    while let Some(c) = chars.next() {
        symbols.push(Infix::scan(c));
        if matches!(c, '(' | '|') {
            continue;
        }
        match chars.peek() {
            None | Some('*' | '|' | ')') => {}
            Some(_) => symbols.push(Infix::Operator(Operator::Concat)),
        }
    }

    symbols
}

/// An expression in reverse polish notation, with concatenation explicit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Token> for Postfix {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for token in &self.0 {
            write!(f, "{}", token.as_char())?;
        }
        Ok(())
    }
}

/// Converts an already validated expression into postfix form.
///
/// Parentheses are not checked here: a `)` pops operators until the nearest
/// `(` (or the bottom of the stack) and then drops that `(`. Balance is the
/// job of [`is_valid`](crate::is_valid).
pub fn to_postfix(expression: impl AsRef<str>) -> Postfix {
    let mut output = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();

    for symbol in insert_concatenation(expression.as_ref()) {
        match symbol {
            Infix::Operand(c) => output.push(Token::Symbol(c)),
            Infix::Open => stack.push(Pending::Open),
            Infix::Close => {
                while let Some(&Pending::Operator(top)) = stack.last() {
                    output.push(top.token());
                    stack.pop();
                }
                // the '(' itself, if any
                stack.pop();
            }
            Infix::Operator(op) => {
                while let Some(&Pending::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(top.token());
                    stack.pop();
                }
                stack.push(Pending::Operator(op));
            }
        }
    }

    while let Some(pending) = stack.pop() {
        if let Pending::Operator(op) = pending {
            output.push(op.token());
        }
    }

    Postfix(output)
}
