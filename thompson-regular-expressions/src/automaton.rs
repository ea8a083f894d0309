use crate::fragment::{Fragment, StateID, Transition};
use std::fmt::{Display, Formatter};

/// A compiled expression. Start state is always 0; there is exactly one
/// final state. Read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    transitions: Vec<Transition>,
    final_state: StateID,
    /// For every state, the indices of its outgoing transitions, in order.
    outgoing: Vec<Vec<usize>>,
}

impl Automaton {
    pub const START: StateID = Fragment::START;

    /// Builds an automaton from a raw transition table.
    ///
    /// Nothing is checked: the matcher gives an answer for any table, but
    /// only tables built by [`compile`](crate::compile) are guaranteed to
    /// connect the start state to `final_state`.
    ///
    /// # Panics
    ///
    /// One index entry is allocated per state up to the largest state
    /// mentioned, so a state id near `usize::MAX` overflows or aborts.
    pub fn from_transitions(transitions: Vec<Transition>, final_state: StateID) -> Self {
        let state_count = transitions
            .iter()
            .map(|t| t.from.max(t.to))
            .max()
            .unwrap_or_default()
            .max(final_state)
            + 1;

        let mut outgoing = vec![Vec::new(); state_count];
        for (idx, t) in transitions.iter().enumerate() {
            outgoing[t.from].push(idx);
        }

        Self {
            transitions,
            final_state,
            outgoing,
        }
    }

    pub fn start(&self) -> StateID {
        Self::START
    }

    pub fn final_state(&self) -> StateID {
        self.final_state
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn state_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Transitions leaving `state`, in table order.
    pub fn outgoing(&self, state: StateID) -> impl Iterator<Item = &Transition> + '_ {
        self.outgoing
            .get(state)
            .into_iter()
            .flatten()
            .map(|&idx| &self.transitions[idx])
    }

    /// Returns true if the automaton accepts `text`.
    pub fn accepts(&self, text: impl AsRef<str>) -> bool {
        crate::matcher::accepts(self, text.as_ref())
    }
}

impl From<Fragment> for Automaton {
    fn from(fragment: Fragment) -> Self {
        let (transitions, final_state) = fragment.into_parts();
        Self::from_transitions(transitions, final_state)
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for t in &self.transitions {
            writeln!(f, "{t}")?;
        }
        write!(
            f,
            "Start state: {}  |  Final state: {}",
            self.start(),
            self.final_state
        )
    }
}
