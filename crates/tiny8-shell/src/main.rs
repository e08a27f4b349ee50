//! CLI entry point for the tiny8 shell binary.

use std::env;
use std::ffi::OsString;
use std::io;

use thiserror as _;
use tiny8_core as _;
use tiny8_shell::{Session, ShellConfig, WriterTrace};

#[cfg(test)]
use rstest as _;

const USAGE_TEXT: &str = "\
Usage: tiny8 [options]

Reads shell commands from stdin and drives a 256-byte tiny8 machine.

Options:
  -t, --trace  Print engine trace events to stderr
  -e, --echo   Echo each input line after its prompt
  -h, --help   Show this help message

Examples:
  tiny8
  tiny8 --echo < program.txt
";

#[derive(Debug, PartialEq, Eq)]
enum ParseResult {
    Run(ShellConfig),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut config = ShellConfig::default();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--trace" || arg == "-t" {
            config.trace = true;
            continue;
        }

        if arg == "--echo" || arg == "-e" {
            config.echo = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        return Err(format!("unexpected argument: {}", arg.to_string_lossy()));
    }

    Ok(ParseResult::Run(config))
}

fn run_shell(config: ShellConfig) -> Result<(), i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config);
    if config.trace {
        session = session.with_trace_sink(Box::new(WriterTrace::new(io::stderr())));
    }

    session.run().map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(config)) => match run_shell(config) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
