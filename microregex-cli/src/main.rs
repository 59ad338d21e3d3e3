mod test_lines;

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use test_lines::test_lines;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("error compiling pattern: {0}")]
    Compile(#[from] microregex::CompileError),
    #[error("error reading file: {0}")]
    Io(#[from] io::Error),
}

/// A small command-line front-end for the `microregex` engine, the
/// external collaborator the core library deliberately leaves out of its
/// own scope.
#[derive(Debug, Parser)]
#[command(name = "microregex", version, about)]
pub struct Cli {
    /// Suppress the "compiled pattern" progress line.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a pattern and report the matched prefix of one or more
    /// haystacks.
    Match(MatchArgs),
    /// Compile a pattern and test every line of a file against it.
    TestLines(TestLinesArgs),
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// The pattern to compile.
    pub pattern: String,
    /// One or more strings to match the pattern against.
    #[arg(required = true)]
    pub strings: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TestLinesArgs {
    /// The pattern to compile.
    pub pattern: String,
    /// A file whose lines are tested against the pattern, one at a time.
    pub file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Match(args) => run_match(&cli, args),
        Command::TestLines(args) => test_lines(&cli, args, |line| println!("{line}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_match(main_args: &Cli, args: &MatchArgs) -> Result<(), CliError> {
    let program = microregex::compile(&args.pattern)?;
    if !main_args.quiet {
        println!(
            "Compiled pattern {:?} ({} cells)",
            args.pattern,
            program.len()
        );
    }

    for haystack in &args.strings {
        let matched = microregex::execute(haystack.as_bytes(), &program);
        if matched > 0 {
            // `matched` is a byte count and may land mid-codepoint if the
            // pattern matches a partial multibyte sequence; lossy-decode
            // rather than risk slicing off a char boundary, and clamp to
            // the haystack's own length before slicing.
            let matched = matched.min(haystack.len());
            let prefix = String::from_utf8_lossy(&haystack.as_bytes()[..matched]);
            println!("Matched {prefix:?} ({matched} bytes) in {haystack:?}");
        } else {
            println!("No match in {haystack:?}");
        }
    }

    Ok(())
}
