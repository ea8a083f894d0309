use crate::{Automaton, Label, Transition};
use proc_macro2::TokenStream;
use quote::quote;

fn emit_label(label: Label, krate: &TokenStream) -> TokenStream {
    match label {
        Label::Epsilon => quote!(#krate::Label::Epsilon),
        Label::Symbol(c) => quote!(#krate::Label::Symbol(#c)),
    }
}

fn emit_transition(t: &Transition, krate: &TokenStream) -> TokenStream {
    let Transition { from, to, label } = *t;
    let label = emit_label(label, krate);
    quote!(#krate::Transition::new(#from, #to, #label))
}

impl Automaton {
    /// Renders an expression that rebuilds this automaton at runtime.
    /// `krate` is the path under which [`Automaton`], [`Transition`] and
    /// [`Label`] are reachable from the expansion site.
    pub fn emit(&self, krate: &TokenStream) -> TokenStream {
        let transitions: Vec<_> = self
            .transitions()
            .iter()
            .map(|t| emit_transition(t, krate))
            .collect();
        let final_state = self.final_state();

        quote!(
            #krate::Automaton::from_transitions(
                ::std::vec![#(#transitions),*],
                #final_state,
            )
        )
    }
}
