#![warn(missing_docs)]
//! Regular expressions compiled to nondeterministic finite automata with
//! Thompson's construction.
//!
//! The accepted syntax is deliberately small: lowercase letters and digits
//! are literals, juxtaposition is concatenation, `|` is union, a postfix `*`
//! is the Kleene star and parentheses group.
//!
//! ```rust
//! use thompson::compile;
//!
//! let automaton = compile("a(ab)*c").unwrap();
//! assert!(automaton.accepts("aababababc"));
//! assert!(!automaton.accepts(""));
//! ```
//!
//! Expressions known while building can be compiled by the [`nfa!`] macro
//! instead, which turns a malformed expression into a compile error.
//!
//! Compilation runs in four stages, each of which is available on its own:
//! [`is_valid`] checks the surface syntax, [`to_postfix`] makes
//! concatenation explicit and reorders the expression into postfix form, the
//! composition rules on [`Fragment`] assemble the automaton, and
//! [`Automaton::accepts`] decides whether a string is in the language.
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

pub use thompson_regular_expressions::*;

/// Compile an expression into an [`Automaton`] at build time.
///
/// ```rust
/// use thompson::nfa;
///
/// let binary = nfa!("(0|1)*1");
/// assert!(binary.accepts("0101"));
/// assert!(!binary.accepts("0110"));
/// ```
///
/// Invalid expressions are rejected by the compiler:
///
/// ```compile_fail
/// let broken = thompson::nfa!("a||b");
/// ```
pub use thompson_macros::nfa;

pub mod selftest;
