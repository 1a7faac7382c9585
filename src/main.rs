use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use clap::Parser;
use log::debug;

use tek::compile_front_end;
use tek::diagnostics::diagnostics::{Diagnostic, Level};

/// Tek front-end driver
#[derive(Parser, Debug)]
#[command(name = "tekc")]
#[command(version = "0.1.0")]
#[command(about = "Parses and checks a Tek source file")]
struct Cli {
    /// Input source file (.tek)
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read {}: {}", cli.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let (program, diagnostics) = compile_front_end(&source);
    debug!(
        "{}: {} top-level statements",
        cli.input.display(),
        program.body.len()
    );

    for diagnostic in &diagnostics {
        display_diagnostic(diagnostic, &cli.input, &source);
    }

    let failed = diagnostics
        .iter()
        .any(|diagnostic| diagnostic.level == Level::Error);
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn display_diagnostic(diagnostic: &Diagnostic, file: &PathBuf, source: &str) {
    /*
        error[parser]: message
        -> point.tek
           |
        20 | var a = #
           | --------^
    */

    let label = match diagnostic.level {
        Level::Error => "error",
        Level::Warning => "warning",
        Level::Info => "info",
    };
    println!("{}[{}]: {}", label, diagnostic.source, diagnostic.message());
    println!("-> {}", file.display());

    let start = diagnostic.span.start;
    let line_text = source
        .split('\n')
        .nth(start.line as usize)
        .unwrap_or("")
        .trim_end_matches('\r');

    let line_str = start.line.to_string();
    let padding = line_str.len() + 2;
    println!("{:>padding$}", "|");

    let (trimmed, removed) = remove_starting_whitespace(line_text);
    println!("{} | {}", line_str, trimmed);

    let arrows = (start.column as usize).saturating_sub(removed) + 1;
    println!("{:>padding$} {:->arrows$}", "|", "^");

    for note in &diagnostic.info {
        println!(
            "{:>padding$} note: {} (line {}, column {})",
            "",
            note.message,
            note.span.start.line,
            note.span.start.column
        );
    }
}

fn remove_starting_whitespace(line: &str) -> (&str, usize) {
    let start = line
        .find(|ch: char| ch != ' ' && ch != '\t')
        .unwrap_or(line.len());
    (&line[start..], start)
}
