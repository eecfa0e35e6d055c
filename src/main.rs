//! jsontree CLI.
//!
//! Thin glue around the parsing core: reads a document from a file (or
//! stdin via `-`), runs the parser, and prints the result or the first
//! grammar error.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use jsontree::{parse_with_limits, render, Limits, TokenKind, Tokenizer};

#[derive(Parser)]
#[command(name = "jsontree")]
#[command(about = "Minimal JSON parser producing an in-memory value tree", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a JSON file and print the value tree in compact form
    Parse {
        /// Input path, or `-` for stdin
        path: PathBuf,

        /// Maximum nesting depth
        #[arg(long)]
        max_depth: Option<u64>,
    },

    /// Dump the token stream produced by the tokenizer
    Tokens {
        /// Input path, or `-` for stdin
        path: PathBuf,
    },

    /// Validate a JSON file, reporting the first grammar error
    Check {
        /// Input path, or `-` for stdin
        path: PathBuf,

        /// Maximum nesting depth
        #[arg(long)]
        max_depth: Option<u64>,
    },
}

fn read_input(path: &PathBuf) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))
    }
}

fn limits_for(max_depth: Option<u64>) -> Limits {
    let mut limits = Limits::standard();
    if let Some(depth) = max_depth {
        limits.max_depth = depth;
    }
    limits
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (path, max_depth) = match &cli.command {
        Commands::Parse { path, max_depth } | Commands::Check { path, max_depth } => {
            (path, *max_depth)
        }
        Commands::Tokens { path } => (path, None),
    };

    let input = match read_input(path) {
        Ok(text) => text,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Parse { .. } => match parse_with_limits(&input, limits_for(max_depth)) {
            Ok(value) => {
                println!("{}", render(&value));
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error[{}]: {}", err.code(), err);
                ExitCode::FAILURE
            }
        },
        Commands::Tokens { .. } => {
            let mut tokenizer = Tokenizer::new(&input);
            loop {
                let token = tokenizer.next_token();
                if token.kind == TokenKind::Eof {
                    break;
                }
                println!("{}", token);
            }
            ExitCode::SUCCESS
        }
        Commands::Check { .. } => match parse_with_limits(&input, limits_for(max_depth)) {
            Ok(_) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error[{}]: {}", err.code(), err);
                ExitCode::FAILURE
            }
        },
    }
}
