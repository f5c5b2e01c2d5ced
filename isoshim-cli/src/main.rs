use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use isoshim_cli::{commands, DISPATCH_FAILURE_CODE, HANDLER_FAILURE_CODE};

#[derive(Parser)]
#[command(name = "isoshim")]
#[command(about = "Isoshim - JSON command shim for isolate archive tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an archive command line into structured options
    #[command(name = "parse_archive_command_line")]
    ParseArchiveCommandLine {
        /// Directory relative option paths are resolved against
        root: String,

        /// Archive flags, forwarded verbatim to the option parser
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Evaluate <(VAR) references against a JSON scope read from stdin
    #[command(name = "isolate_format_eval_variables")]
    IsolateFormatEvalVariables {
        /// Expression to evaluate
        expression: String,
    },

    /// Sum integer tokens; exercises the dispatch path without the core library
    #[command(name = "test_sum")]
    TestSum {
        /// Integer tokens to sum
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_dispatch_failure(err),
    };

    // Setup logging on stderr; stdout carries only the JSON result
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::ParseArchiveCommandLine { root, args } => commands::archive::execute(&root, &args),

        Commands::IsolateFormatEvalVariables { expression } => {
            commands::eval::execute(&expression, io::stdin().lock())
        }

        Commands::TestSum { tokens } => commands::sum::execute(&tokens),
    };

    match result {
        Ok(value) => emit(&value),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(HANDLER_FAILURE_CODE)
        }
    }
}

/// Write the handler's value to stdout as a single JSON document.
fn emit(value: &serde_json::Value) -> ExitCode {
    let mut stdout = io::stdout().lock();
    if let Err(err) = writeln!(stdout, "{value}") {
        eprintln!("Error: failed to write result: {err}");
        return ExitCode::from(HANDLER_FAILURE_CODE);
    }
    ExitCode::SUCCESS
}

/// Report an invocation clap rejected. Help and version requests are
/// successful exits; everything else is a dispatch failure.
fn report_dispatch_failure(err: clap::Error) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        let _ = err.print();
        return ExitCode::SUCCESS;
    }

    let offending: Vec<String> = env::args().skip(1).collect();
    let _ = err.print();
    eprintln!("bad arguments: {offending:?}");
    ExitCode::from(DISPATCH_FAILURE_CODE)
}
