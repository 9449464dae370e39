mod error;

use arith_parser::{ast::TreeDump, parse, tokenize, validate, Expr, Token};
use arith_rewrite::{canonical_forms, equivalents, expand, optimize};
use error::Error;
use log::info;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{
    collections::BTreeSet,
    fs,
    io::{self, IsTerminal, Read},
    process::ExitCode,
};

/// Everything computed for one expression.
struct Analysis {
    tokens: String,
    tree: Expr,
    optimized: Expr,
    /// Enumerating the equivalent forms can fail on large inputs without affecting the rest.
    equivalents: Result<BTreeSet<String>, Error>,
    canonical: Vec<String>,
    expanded: Expr,
}

/// Runs the whole pipeline on the given input string. Only syntax errors stop the analysis.
fn analyze(input: &str) -> Result<Analysis, Error> {
    let mut tokens = tokenize(input).map_err(|err| vec![err])?;
    let tokens_text = tokens.iter().map(Token::to_string).collect::<Vec<_>>().join(", ");
    let validation = validate(&mut tokens);
    if !validation.is_valid() {
        return Err(validation.errors.into());
    }

    let tree = parse(&tokens).map_err(|err| vec![err])?;
    let optimized = optimize(&tree);
    let equivalents = equivalents(&tree).map_err(Error::from);
    let canonical = canonical_forms(&tree);
    let expanded = expand(&tree);
    Ok(Analysis {
        tokens: tokens_text,
        tree,
        optimized,
        equivalents,
        canonical,
        expanded,
    })
}

fn print_analysis(analysis: &Analysis, input: &str) {
    println!("tokens: {}", analysis.tokens);
    print!("{}", TreeDump(&analysis.tree));
    println!("height: {}, width: {}", analysis.tree.height(), analysis.tree.max_width());
    println!("optimized: {}", analysis.optimized);
    match &analysis.equivalents {
        Ok(forms) => {
            println!("equivalent forms ({}):", forms.len());
            for form in forms {
                println!("  {}", form);
            }
        },
        Err(err) => {
            println!("equivalent forms: not available");
            report(err, input);
        },
    }
    println!("canonical: {}", analysis.canonical.join(", "));
    println!("expanded: {}", analysis.expanded);
}

fn report(err: &Error, input: &str) {
    if let Err(io_err) = err.report_to_stderr(input) {
        eprintln!("could not print report: {}", io_err);
    }
}

/// Analyzes the input and prints the result, or reports the errors to stderr. Returns true if
/// the input was analyzed without any error.
fn analyze_print(input: &str) -> bool {
    match analyze(input) {
        Ok(analysis) => {
            print_analysis(&analysis, input);
            analysis.equivalents.is_ok()
        },
        Err(err) => {
            report(&err, input);
            false
        },
    }
}

/// Analyzes every non-blank line of the input.
fn analyze_lines(input: &str) -> ExitCode {
    let mut success = true;
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        success &= analyze_print(line);
    }
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // analyze each line of the file
        info!("reading expressions from {}", filename);
        match fs::read_to_string(&filename) {
            Ok(input) => analyze_lines(&input),
            Err(err) => {
                eprintln!("could not read {}: {}", filename, err);
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read expressions from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        analyze_lines(&input)
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            analyze_print(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use arith_rewrite::error::ChainTooLong;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn full_analysis() {
        let analysis = analyze("(a+b)*c").unwrap();
        assert_eq!(analysis.optimized.to_string(), "(a+b)*c");
        assert_eq!(analysis.canonical, vec!["(a+b)*c"]);
        assert_eq!(analysis.expanded.to_string(), "a*c+b*c");
        assert_eq!(analysis.equivalents.unwrap().len(), 1);
    }

    #[test]
    fn enumeration_failure_keeps_other_results() {
        let input = "a+b+c+d+e+f+g+h+i+j+k+l*1";
        let analysis = analyze(input).unwrap();
        assert!(matches!(
            analysis.equivalents,
            Err(Error::Enumeration(ref err)) if err.kind_is::<ChainTooLong>()
        ));
        assert_eq!(analysis.optimized.to_string(), "a+b+c+d+e+f+g+h+i+j+k+l");
        assert_eq!(
            analysis.canonical,
            vec!["l*1+a+b+c+d+e+f+g+h+i+j+k", "a+b+c+d+e+f+g+h+i+j+k+l*1"],
        );
        assert_eq!(analysis.expanded.to_string(), input);
    }

    #[test]
    fn syntax_errors_stop_the_analysis() {
        let Err(Error::Syntax(errors)) = analyze("a+*b") else {
            panic!("expected a syntax error");
        };
        assert_eq!(errors.len(), 1);
    }
}
