use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use ram::{parse_source, run_source};
use tracing::debug;

/// ram runs programs written in Ram, a small line-oriented scripting
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The `.ram` file to run.
    file: PathBuf,

    /// Print the parsed program instead of running it.
    #[arg(long)]
    ast: bool,

    /// Only check that the program parses.
    #[arg(long, conflicts_with = "ast")]
    check: bool,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt().with_writer(std::io::stderr)
                                     .with_env_filter(tracing_subscriber::EnvFilter::try_from_env("RAM_LOG")
                                         .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")))
                                     .try_init();

    let args = Args::parse();

    if args.file.extension().and_then(|ext| ext.to_str()) != Some("ram") {
        eprintln!("'{}' is not a .ram file.", args.file.display());
        return ExitCode::FAILURE;
    }

    let Ok(script) = fs::read_to_string(&args.file) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.file.display());
        return ExitCode::FAILURE;
    };
    debug!(file = %args.file.display(), bytes = script.len(), "loaded script");

    let result = if args.ast || args.check {
        parse_source(&script).map(|module| {
                                 if args.ast {
                                     print!("{module}");
                                 }
                             })
                             .map_err(ram::error::Error::from)
    } else {
        run_source(&script).map(|_| ())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
