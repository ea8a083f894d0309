use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{arg, command, crate_authors, value_parser, ArgMatches, Command};

use thompson::{compile, Automaton};
use thompson::selftest::{self, CASES};

const SEPARATOR: &str = "=====================";

fn cli() -> Command {
    command!()
        .author(crate_authors!("\n"))
        .arg(arg!([EXPRESSION] "Expression to compile, read from stdin when omitted"))
        .arg(arg!(--"skip-self-test" "Do not run the built-in test table on start-up"))
        .arg(arg!(-a --"show-automaton" "Print the automaton of every self-test case"))
        .arg(
            arg!(--dot <PATH> "Write the compiled automaton to PATH in Graphviz format")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn self_test(show_automaton: bool) {
    println!("[self-test] running {} cases", CASES.len());
    let report = selftest::run(CASES);
    for result in &report.results {
        println!("{result}");
        if let Some(automaton) = result.automaton().filter(|_| show_automaton) {
            println!("{automaton}");
        }
    }
    println!("{report}");
    println!(
        "[self-test] {} passed, {} failed, {} refused to compile",
        report.passed(),
        report.failed(),
        report.invalid()
    );
    if !report.is_success() {
        log::error!("{} of {} self-test cases failed", report.failed(), CASES.len());
    }
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> anyhow::Result<Option<String>> {
    println!("{message}");
    io::stdout().flush()?;
    lines.next().transpose().context("could not read from stdin")
}

fn write_dot(automaton: &Automaton, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create `{}`", path.display()))?;
    let mut writer = BufWriter::new(file);
    automaton.output_dot(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    if !args.get_flag("skip-self-test") {
        self_test(args.get_flag("show-automaton"));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let expression = match args.get_one::<String>("EXPRESSION") {
        Some(expression) => expression.clone(),
        None => match prompt(&mut lines, "Input regex")? {
            Some(line) => line.trim().to_string(),
            None => bail!("no expression given"),
        },
    };

    let automaton = compile(&expression)?;
    println!("{automaton}");

    if let Some(path) = args.get_one::<PathBuf>("dot") {
        write_dot(&automaton, path)?;
        log::info!("wrote automaton of {expression:?} to {}", path.display());
    }

    loop {
        println!("{SEPARATOR}");
        let Some(text) = prompt(&mut lines, "Input string to check")? else {
            break;
        };
        println!("{}", automaton.accepts(text.trim()));
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    exec(&cli().get_matches())
}

#[cfg(test)]
mod tests {
    use super::{cli, write_dot};
    use std::path::PathBuf;
    use thompson::compile;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }

    #[test]
    fn flags() {
        let args = cli()
            .try_get_matches_from(["thompson", "--skip-self-test", "--dot", "out.dot", "a*b"])
            .unwrap();
        assert!(args.get_flag("skip-self-test"));
        assert!(!args.get_flag("show-automaton"));
        assert_eq!(args.get_one::<String>("EXPRESSION").map(String::as_str), Some("a*b"));
        assert_eq!(args.get_one::<PathBuf>("dot"), Some(&PathBuf::from("out.dot")));
    }

    #[test]
    fn dot_file() {
        let dir = std::env::temp_dir().join(format!("thompson-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("union.dot");

        write_dot(&compile("a|b").unwrap(), &path).unwrap();
        let dot = std::fs::read_to_string(&path).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("node[label=\"5\", shape=doublecircle] id5"));
        assert!(dot.contains("id3 -> id4 [label=\"b\"]"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn dot_file_in_missing_directory() {
        let path = std::env::temp_dir()
            .join("thompson-cli-missing")
            .join("x")
            .join("a.dot");
        let err = write_dot(&compile("a").unwrap(), &path).unwrap_err();
        assert!(err.to_string().starts_with("could not create"));
    }
}
