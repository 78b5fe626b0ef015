use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::Parser as CliParser;
use mask::{lexer::lexer::tokenize, parser::parser::parse, render_diagnostic};

/// Front end for the Mask language: scans and parses a preprocessed source
/// file and reports syntax diagnostics.
#[derive(CliParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Preprocessed source file
    input: PathBuf,

    /// Print the parsed tree
    #[arg(long)]
    dump_ast: bool,

    /// Print per-phase timings to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Everything a run depends on, resolved from the command line up front.
#[derive(Debug, Clone)]
struct Config {
    input: PathBuf,
    dump_ast: bool,
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input: cli.input,
            dump_ast: cli.dump_ast,
            verbose: cli.verbose,
        }
    }
}

fn run(config: &Config) -> Result<bool> {
    let source = read_to_string(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let file_name = config.input.to_string_lossy();

    let start = Instant::now();
    let tokens = tokenize(&source);
    if config.verbose {
        eprintln!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());
    }

    let parse_start = Instant::now();
    let (tree, diagnostics) = parse(tokens);
    if config.verbose {
        eprintln!("Parsed {} nodes in {:?}", tree.len(), parse_start.elapsed());
    }

    if config.dump_ast {
        print!("{}", tree);
    }

    for diagnostic in &diagnostics {
        eprint!("{}", render_diagnostic(diagnostic, &source, &file_name));
    }

    if config.verbose {
        eprintln!("Total time: {:?}", start.elapsed());
    }

    Ok(!diagnostics.has_errors())
}

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::from(2)
        }
    }
}
