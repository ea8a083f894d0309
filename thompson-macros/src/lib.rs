use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, LitStr, Token};

use thompson_regular_expressions::Automaton;

#[cfg(feature = "dot")]
use std::fs::{self, File};
#[cfg(feature = "dot")]
use std::path::PathBuf;

struct NfaInput {
    expression: LitStr,
    graph: Option<LitStr>,
}

impl Parse for NfaInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let expression = input.parse()?;
        let graph = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let key: syn::Ident = input.parse()?;
            if key != "graph" {
                return Err(syn::Error::new(key.span(), "expected `graph = \"path\"`"));
            }
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(Self { expression, graph })
    }
}

/// Compiles an expression while the calling crate is being built.
///
/// `nfa!("a(ab)*c")` expands to an expression of type
/// `thompson::Automaton`. An expression that does not compile is reported
/// as an error on the string literal. With the `dot` feature,
/// `nfa!("a*", graph = "a.dot")` also writes the automaton to a file.
///
/// ```rust
/// let automaton = thompson::nfa!("a(ab)*c");
/// assert!(automaton.accepts("aabc"));
/// assert!(!automaton.accepts("abc"));
/// ```
#[proc_macro]
pub fn nfa(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as NfaInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &NfaInput) -> syn::Result<proc_macro2::TokenStream> {
    let automaton = thompson_regular_expressions::compile(input.expression.value())
        .map_err(|err| syn::Error::new(input.expression.span(), err))?;

    if let Some(path) = &input.graph {
        write_graph(&automaton, path)?;
    }

    Ok(automaton.emit(&quote!(::thompson)))
}

#[cfg(not(feature = "dot"))]
fn write_graph(_: &Automaton, path: &LitStr) -> syn::Result<()> {
    Err(syn::Error::new(
        path.span(),
        "graph output requires the `dot` feature",
    ))
}

// relative paths are taken from the manifest of the invoking crate
#[cfg(feature = "dot")]
fn write_graph(automaton: &Automaton, path: &LitStr) -> syn::Result<()> {
    let mut target = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_default();
    target.push(path.value());

    let written = target
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| File::create(&target))
        .and_then(|mut f| automaton.output_dot(&mut f));
    written.map_err(|e| {
        syn::Error::new(
            path.span(),
            format!("failed while graphing at {}: {e}", target.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{expand, NfaInput};

    fn parse(input: &str) -> syn::Result<NfaInput> {
        syn::parse_str(input)
    }

    #[test]
    fn plain_expression() {
        let input = parse(r#""a*b""#).unwrap();
        assert!(input.graph.is_none());
        let code = expand(&input).unwrap().to_string();
        assert!(code.contains("from_transitions"));
    }

    #[test]
    fn unknown_argument() {
        let err = parse(r#""a", shape = "x""#).err().unwrap();
        assert_eq!(err.to_string(), "expected `graph = \"path\"`");
    }

    #[test]
    fn invalid_expression() {
        let err = expand(&parse(r#""a**""#).unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "invalid expression: `a**`");
    }

    #[cfg(not(feature = "dot"))]
    #[test]
    fn graph_needs_dot_feature() {
        let input = parse(r#""a*", graph = "a.dot""#).unwrap();
        let err = expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "graph output requires the `dot` feature");
    }

    #[cfg(feature = "dot")]
    #[test]
    fn graph_is_written() {
        let path = std::env::temp_dir()
            .join(format!("thompson-macros-{}", std::process::id()))
            .join("star.dot");
        let input = parse(&format!(r#""a*", graph = {:?}"#, path.display().to_string())).unwrap();
        expand(&input).unwrap();

        let dot = std::fs::read_to_string(&path).unwrap();
        assert!(dot.contains("node[label=\"3\", shape=doublecircle] id3"));
        assert!(dot.contains("id1 -> id2 [label=\"a\"]"));
        std::fs::remove_file(path).unwrap();
    }
}
