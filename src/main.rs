use clap::Parser;
use std::process::ExitCode;

use cron_describe::describe;

/// Describe a cron schedule expression in plain English.
#[derive(Parser)]
#[command(name = "cron_describe", version, about)]
struct Cli {
    /// A quoted cron expression: five schedule fields followed by a
    /// command, e.g. "30 2 1 1 0 backup.sh".
    expression: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage and argument errors exit 1; --help and --version are
            // not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match describe(&cli.expression) {
        Ok(sentence) => {
            println!("{sentence}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
