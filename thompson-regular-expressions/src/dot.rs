use crate::Automaton;
use std::io;
use std::io::Write;

impl Automaton {
    /// Writes the automaton as a Graphviz digraph. The final state is drawn
    /// as a double circle.
    pub fn output_dot(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "digraph {{")?;
        writeln!(w, "rankdir=LR")?;

        for id in 0..self.state_count() {
            let attrs = if id == self.final_state() {
                ", shape=doublecircle"
            } else {
                ""
            };
            writeln!(w, "node[label=\"{id}\"{attrs}] id{id}")?;
        }

        for t in self.transitions() {
            writeln!(w, "id{} -> id{} [label=\"{}\"]", t.from, t.to, t.label)?;
        }

        writeln!(w, "}}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;

    #[test]
    fn renders_states_and_edges() {
        let mut out = Vec::new();
        compile("a|b").unwrap().output_dot(&mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.contains("node[label=\"5\", shape=doublecircle] id5"));
        assert!(dot.contains("node[label=\"0\"] id0"));
        assert!(dot.contains("id1 -> id2 [label=\"a\"]"));
        assert!(dot.contains("id0 -> id3 [label=\"ε\"]"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
