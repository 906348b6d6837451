use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{ArgAction, Parser, ValueEnum};
use langite::{
    ast::dump::dump,
    errors::errors::{Error, ErrorCategory},
    parse, render_error, resolve_names, resolve_types, tokenize,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How far to run the pipeline before printing its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Print the token stream
    Tokens,
    /// Print the syntax tree
    Parse,
    /// Print the syntax tree after name resolution
    Names,
    /// Print the syntax tree with resolved types
    Types,
}

#[derive(Parser)]
#[command(name = "langite")]
#[command(about = "Langite compiler front end", long_about = None)]
struct Cli {
    /// Source file to compile
    file: PathBuf,

    /// Last stage to run
    #[arg(long, value_enum, default_value_t = Stage::Types)]
    stage: Stage,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(source: &str, file: String, stage: Stage) -> Result<String, Error> {
    let start = Instant::now();

    if stage == Stage::Tokens {
        let tokens = tokenize(source, Some(file))?;
        info!(elapsed = ?start.elapsed(), "tokenized");
        return Ok(tokens.iter().map(|token| token.debug() + "\n").collect());
    }

    let ast = parse(source, Some(file))?;
    info!(elapsed = ?start.elapsed(), "parsed");
    if stage == Stage::Parse {
        return dump(&ast, None);
    }

    let names_start = Instant::now();
    resolve_names(&ast)?;
    info!(elapsed = ?names_start.elapsed(), "resolved names");
    if stage == Stage::Names {
        return dump(&ast, None);
    }

    let types_start = Instant::now();
    let types = resolve_types(&ast)?;
    info!(elapsed = ?types_start.elapsed(), "resolved types");
    info!(elapsed = ?start.elapsed(), "total");

    dump(&ast, Some(&types))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error reading {}: {}", cli.file.display(), error);
            return ExitCode::from(3);
        }
    };

    match run(&source, cli.file.display().to_string(), cli.stage) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            ExitCode::from(match error.category() {
                ErrorCategory::Diagnostic => 1,
                ErrorCategory::Unsupported => 2,
                ErrorCategory::Internal => 3,
            })
        }
    }
}
