use std::fmt::{Display, Formatter};

pub type StateID = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Epsilon,
    Symbol(char),
}

impl Label {
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(c) => write!(f, "{c}"),
        }
    }
}

/// An edge of the automaton. Two transitions with the same endpoints and
/// label are the same transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: StateID,
    pub to: StateID,
    pub label: Label,
}

impl Transition {
    pub fn new(from: StateID, to: StateID, label: Label) -> Self {
        Self { from, to, label }
    }

    pub fn epsilon(from: StateID, to: StateID) -> Self {
        Self::new(from, to, Label::Epsilon)
    }

    fn shifted(self, offset: StateID) -> Self {
        Self::new(self.from + offset, self.to + offset, self.label)
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.from, self.label, self.to)
    }
}

/// A self-contained piece of automaton: start state 0, states numbered
/// densely up to `final_state`.
///
/// Every composition rule is a pure function producing a fresh fragment.
/// The order of the transitions it emits is part of its contract, since the
/// matcher explores outgoing edges in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    transitions: Vec<Transition>,
    final_state: StateID,
}

impl Fragment {
    pub const START: StateID = 0;

    /// `0 -c-> 1`
    pub fn literal(c: char) -> Self {
        Self {
            transitions: vec![Transition::new(0, 1, Label::Symbol(c))],
            final_state: 1,
        }
    }

    /// `0 -ε-> 1`, accepting only the empty string.
    pub fn epsilon() -> Self {
        Self {
            transitions: vec![Transition::epsilon(0, 1)],
            final_state: 1,
        }
    }

    pub fn final_state(&self) -> StateID {
        self.final_state
    }

    pub fn state_count(&self) -> usize {
        self.final_state + 1
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn into_parts(self) -> (Vec<Transition>, StateID) {
        (self.transitions, self.final_state)
    }

    /// Renumbers every state by `offset`.
    pub fn shifted(&self, offset: StateID) -> impl Iterator<Item = Transition> + '_ {
        self.transitions.iter().map(move |t| t.shifted(offset))
    }

    /// `a` followed by `b`. The start of `b` is merged into the final state
    /// of `a`, so the result has one state less than the two operands.
    pub fn concat(a: &Fragment, b: &Fragment) -> Self {
        let mut transitions = Vec::with_capacity(a.transitions.len() + b.transitions.len());
        transitions.extend_from_slice(&a.transitions);
        transitions.extend(b.shifted(a.final_state));

        Self {
            transitions,
            final_state: a.final_state + b.final_state,
        }
    }

    /// `a | b`, with a fresh start state 0 and a fresh final state.
    pub fn union(a: &Fragment, b: &Fragment) -> Self {
        let a_count = a.state_count();
        let b_count = b.state_count();
        let final_state = a_count + b_count + 1;

        let mut transitions = Vec::with_capacity(a.transitions.len() + b.transitions.len() + 4);
        transitions.push(Transition::epsilon(0, 1));
        transitions.extend(a.shifted(1));
        transitions.push(Transition::epsilon(a_count, final_state));
        transitions.push(Transition::epsilon(0, a_count + 1));
        transitions.extend(b.shifted(a_count + 1));
        transitions.push(Transition::epsilon(a_count + b_count, final_state));

        Self {
            transitions,
            final_state,
        }
    }

    /// `a*`, with a fresh start state 0 and a fresh final state.
    pub fn star(a: &Fragment) -> Self {
        let a_count = a.state_count();
        let final_state = a_count + 1;

        let mut transitions = Vec::with_capacity(a.transitions.len() + 4);
        // enter
        transitions.push(Transition::epsilon(0, 1));
        transitions.extend(a.shifted(1));
        // exit
        transitions.push(Transition::epsilon(a_count, final_state));
        // loop back
        transitions.push(Transition::epsilon(a_count, 1));
        // skip
        transitions.push(Transition::epsilon(0, final_state));

        Self {
            transitions,
            final_state,
        }
    }
}
