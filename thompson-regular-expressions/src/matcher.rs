//! Acceptance testing by bounded backtracking.
//!
//! The search walks offsets `0..=len` in order. Every state in the frontier
//! of an offset is the root of a depth-first exploration that follows
//! epsilon transitions at that offset and hands states reached by a symbol
//! over to the frontier of the next offset. Epsilon cycles (the loop-back
//! edge of a star) are cut off by allowing each epsilon transition to be
//! taken at most [`EPSILON_REVISITS`] times per offset.

use crate::fragment::{Label, StateID, Transition};
use crate::Automaton;
use std::collections::HashMap;

/// How often one epsilon transition may be taken while exploring one offset.
const EPSILON_REVISITS: u8 = 2;

#[derive(Debug)]
struct Frame {
    state: StateID,
    /// Whether this branch has consumed the symbol at the current offset.
    consumed: bool,
    /// Next outgoing transition to try.
    cursor: usize,
}

impl Frame {
    fn new(state: StateID, consumed: bool) -> Self {
        Self {
            state,
            consumed,
            cursor: 0,
        }
    }
}

struct Search<'a> {
    automaton: &'a Automaton,
    text: Vec<char>,
    /// States reached after consuming `i` symbols, in discovery order.
    frontier: Vec<Vec<StateID>>,
    /// Epsilon transitions taken at the current offset. Cleared per offset.
    used_epsilon: HashMap<Transition, u8>,
}

impl<'a> Search<'a> {
    fn new(automaton: &'a Automaton, text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let mut frontier = vec![Vec::new(); text.len() + 1];
        frontier[0].push(automaton.start());

        Self {
            automaton,
            text,
            frontier,
            used_epsilon: HashMap::new(),
        }
    }

    fn is_last(&self, offset: usize) -> bool {
        self.text.is_empty() || offset + 1 == self.text.len()
    }

    // repeats are kept, each one is explored with whatever budget is left
    fn defer(&mut self, offset: usize, state: StateID) {
        log::trace!("offset {}: state {state} joins the frontier", offset + 1);
        self.frontier[offset + 1].push(state);
    }

    fn take_epsilon(&mut self, transition: Transition) -> bool {
        let uses = self.used_epsilon.entry(transition).or_default();
        if *uses < EPSILON_REVISITS {
            *uses += 1;
            true
        } else {
            log::trace!("epsilon budget of {transition} exhausted");
            false
        }
    }

    /// Explores everything reachable from `root` at `offset`.
    fn explore(&mut self, root: StateID, offset: usize) -> bool {
        let automaton = self.automaton;
        let final_state = automaton.final_state();
        let current = self.text.get(offset).copied();
        let last = self.is_last(offset);
        let empty = self.text.is_empty();

        let mut stack = vec![Frame::new(root, false)];
        while let Some(frame) = stack.last_mut() {
            let Some(&transition) = automaton.outgoing(frame.state).nth(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let is_epsilon = transition.label.is_epsilon();
            let is_symbol = current.is_some_and(|c| transition.label == Label::Symbol(c));

            if is_symbol {
                // a second symbol at the same offset ends this branch
                if frame.consumed {
                    stack.pop();
                    continue;
                }
                frame.consumed = true;
            }
            let consumed = frame.consumed;

            if (is_epsilon || is_symbol)
                && transition.to == final_state
                && last
                && (consumed || empty)
            {
                return true;
            }

            if is_symbol {
                if last {
                    // trailing epsilons may still lead to the final state
                    stack.push(Frame::new(transition.to, true));
                } else {
                    self.defer(offset, transition.to);
                }
            } else if is_epsilon && self.take_epsilon(transition) {
                stack.push(Frame::new(transition.to, consumed));
            }
        }

        false
    }

    fn run(&mut self) -> bool {
        for offset in 0..self.frontier.len() {
            self.used_epsilon.clear();
            let states = std::mem::take(&mut self.frontier[offset]);
            for state in states {
                if self.explore(state, offset) {
                    return true;
                }
            }
        }
        false
    }
}

/// Returns true if `automaton` accepts `text`.
///
/// Never fails: characters outside the alphabet simply match nothing.
pub fn accepts(automaton: &Automaton, text: &str) -> bool {
    let verdict = Search::new(automaton, text).run();
    log::debug!("{text:?} accepted: {verdict}");
    verdict
}

#[cfg(test)]
mod tests {
    use crate::{compile, Automaton, Label, Transition};

    fn check(expression: &str, text: &str) -> bool {
        compile(expression).unwrap().accepts(text)
    }

    #[test]
    fn sequence() {
        assert!(check("ab", "ab"));
        assert!(!check("ab", "a"));
        assert!(!check("ab", ""));
        assert!(!check("ab", "abb"));
        assert!(!check("ab", "ba"));
    }

    #[test]
    fn single_symbol() {
        assert!(check("a", "a"));
        assert!(!check("a", ""));
        assert!(!check("a", "aa"));
        assert!(!check("a", "b"));
    }

    #[test]
    fn star() {
        assert!(check("a*", ""));
        assert!(check("a*", "a"));
        assert!(check("a*", "aaa"));
        assert!(!check("a*", "b"));
        assert!(!check("a*", "ab"));
    }

    #[test]
    fn union() {
        assert!(check("a|b", "a"));
        assert!(check("a|b", "b"));
        assert!(!check("a|b", "ab"));
        assert!(!check("a|b", ""));
    }

    #[test]
    fn grouped_star() {
        assert!(check("a(ab)*c", "aababababc"));
        assert!(check("a(ab)*c", "ac"));
        assert!(!check("a(ab)*c", ""));
        assert!(!check("a(ab)*c", "aababababcc"));
        assert!(!check("a(ab)*c", "c"));
    }

    #[test]
    fn empty_group() {
        assert!(check("()", ""));
        assert!(!check("()", "a"));
        assert!(!check("()", "aa"));
    }

    #[test]
    fn trailing_epsilons_reuse_budget() {
        // the last `b` is followed by the star exits of b* and c*, which
        // were already walked once at this offset
        assert!(check("a*b*c*", "abb"));
        assert!(check("a*b*c*", "ccc"));
        assert!(!check("a*b*c*", "cba"));
    }

    #[test]
    fn digits() {
        assert!(check("0|1", "1"));
        assert!(check("(01)*", "0101"));
        assert!(!check("(01)*", "010"));
    }

    #[test]
    fn foreign_text() {
        assert!(!check("a*", "A"));
        assert!(!check("a", "ä"));
        assert!(!check("ab", "a b"));
    }

    #[test]
    fn epsilon_cycle_terminates() {
        let cycle = Automaton::from_transitions(
            vec![Transition::epsilon(0, 1), Transition::epsilon(1, 0)],
            2,
        );
        assert!(!cycle.accepts(""));
        assert!(!cycle.accepts("a"));

        let escape = Automaton::from_transitions(
            vec![
                Transition::epsilon(0, 1),
                Transition::epsilon(1, 0),
                Transition::epsilon(0, 2),
            ],
            2,
        );
        assert!(escape.accepts(""));
        assert!(!escape.accepts("a"));
    }

    #[test]
    fn one_symbol_per_branch_and_offset() {
        // 0 -a-> 1, 1 -a-> 2 (final): "a" must not cross both edges
        let a = Automaton::from_transitions(
            vec![
                Transition::new(0, 1, Label::Symbol('a')),
                Transition::new(1, 2, Label::Symbol('a')),
            ],
            2,
        );
        assert!(!a.accepts("a"));
        assert!(a.accepts("aa"));
    }

    #[test]
    fn deeply_nested_stars_terminate() {
        let a = compile("(0|(1(01*(00)*0)*1)*)*").unwrap();
        assert!(a.accepts(""));
        assert!(a.accepts("0110"));
        assert!(!a.accepts("00001"));
        assert!(a.accepts("1011100000011100000110111000000111000001"));
    }
}
