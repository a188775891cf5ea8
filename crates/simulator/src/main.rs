//! CLI entry point for the Enigma simulator binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use enigma_core::{Alphabet, TraceEvent, TraceSink};
use simulator::config::{parse_config, MachineConfig};
use simulator::driver::Simulator;
use simulator::errors::{SimulatorError, SimulatorErrorKind};
use thiserror as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: enigma-sim [<input>] [options]

Reads message input (default: stdin). Lines starting with `*` set up the
machine; every other line is converted and printed in groups of five.

Options:
  -c, --config <file>  Machine configuration (default: built-in catalog)
  -o, --output <file>  Output file path (default: stdout)
  -v, --verbose        Print rotor steps and conversions to stderr
  -h, --help           Show this help message

Examples:
  enigma-sim messages.in
  enigma-sim messages.in -c default.conf -o messages.out
  echo '* B Beta III IV I AXLE' | enigma-sim
";

#[derive(Debug, Default, PartialEq, Eq)]
struct RunArgs {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
}

#[derive(Debug)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut run = RunArgs::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--verbose" || arg == "-v" {
            run.verbose = true;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -o".to_string())?;
            run.output = Some(PathBuf::from(value));
            continue;
        }

        if arg == "-c" || arg == "--config" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -c".to_string())?;
            run.config = Some(PathBuf::from(value));
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if run.input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        run.input = Some(PathBuf::from(arg));
    }

    Ok(ParseResult::Run(run))
}

/// Prints trace events to stderr using the machine's symbols.
struct StderrTrace {
    alphabet: Arc<Alphabet>,
}

impl StderrTrace {
    fn symbol(&self, index: usize) -> char {
        self.alphabet.to_symbol(index).unwrap_or('?')
    }
}

impl TraceSink for StderrTrace {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::RotorAdvanced { slot, setting } => {
                eprintln!("  step slot {slot} -> {}", self.symbol(setting));
            }
            TraceEvent::SymbolConverted { input, output } => {
                eprintln!("{} -> {}", self.symbol(input), self.symbol(output));
            }
        }
    }
}

fn io_error(path: &Path, action: &str, e: &io::Error) -> SimulatorError {
    SimulatorError::new(SimulatorErrorKind::Io(format!(
        "failed to {action} {}: {e}",
        path.display()
    )))
}

fn load_config(path: Option<&Path>) -> Result<MachineConfig, SimulatorError> {
    let Some(path) = path else {
        return MachineConfig::builtin();
    };
    let text = fs::read_to_string(path).map_err(|e| io_error(path, "read", &e))?;
    parse_config(&text).map_err(|e| e.with_origin(&path.display().to_string()))
}

fn read_input(path: Option<&Path>) -> Result<String, SimulatorError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| io_error(path, "read", &e)),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|e| {
                SimulatorError::new(SimulatorErrorKind::Io(format!("failed to read stdin: {e}")))
            })?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), SimulatorError> {
    match path {
        Some(path) => fs::write(path, text).map_err(|e| io_error(path, "write", &e)),
        None => io::stdout().write_all(text.as_bytes()).map_err(|e| {
            SimulatorError::new(SimulatorErrorKind::Io(format!("failed to write stdout: {e}")))
        }),
    }
}

fn run(args: &RunArgs) -> Result<(), SimulatorError> {
    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let mut sim = Simulator::new(&config)?;

    let mut output = String::new();
    let processed = if args.verbose {
        let mut trace = StderrTrace {
            alphabet: Arc::clone(&config.alphabet),
        };
        sim.process_traced(&input, &mut output, &mut trace)
    } else {
        sim.process(&input, &mut output)
    };

    // Messages converted before a failing line are still emitted.
    write_output(args.output.as_deref(), &output)?;

    processed.map_err(|e| match &args.input {
        Some(path) => e.with_origin(&path.display().to_string()),
        None => e.with_origin("<stdin>"),
    })
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => match run(&args) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{}", e.format_for_stderr());
                1
            }
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    fn args(list: &[&str]) -> impl Iterator<Item = OsString> {
        list.iter()
            .map(|arg| OsString::from(*arg))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_all_options() {
        let result = parse_args(args(&["in.txt", "-c", "m.conf", "--output", "out.txt", "-v"]))
            .expect("valid args should parse");

        let ParseResult::Run(run) = result else {
            panic!("expected run arguments");
        };
        assert_eq!(
            run,
            RunArgs {
                input: Some(PathBuf::from("in.txt")),
                config: Some(PathBuf::from("m.conf")),
                output: Some(PathBuf::from("out.txt")),
                verbose: true,
            }
        );
    }

    #[test]
    fn no_arguments_means_stdin_to_stdout() {
        let result = parse_args(std::iter::empty()).expect("empty args parse");
        let ParseResult::Run(run) = result else {
            panic!("expected run arguments");
        };
        assert_eq!(run, RunArgs::default());
    }

    #[test]
    fn parses_help_flag() {
        let result = parse_args(args(&["in.txt", "-h"])).expect("help should parse");
        assert!(matches!(result, ParseResult::Help));
    }

    #[test]
    fn rejects_unknown_option() {
        let error = parse_args(args(&["--rings"])).expect_err("unknown option should fail");
        assert!(error.contains("unknown option"));
    }

    #[test]
    fn rejects_second_input() {
        let error = parse_args(args(&["a.txt", "b.txt"])).expect_err("two inputs should fail");
        assert!(error.contains("multiple input"));
    }

    #[test]
    fn missing_option_value_is_reported() {
        let error = parse_args(args(&["-c"])).expect_err("missing value should fail");
        assert!(error.contains("-c"));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let error = load_config(Some(Path::new("/nonexistent/enigma.conf")))
            .expect_err("file does not exist");
        assert!(matches!(error.kind, SimulatorErrorKind::Io(_)));
    }
}
