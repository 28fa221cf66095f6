mod error;
mod logging;
mod workflow;

use std::process::ExitCode;

use clap::Parser;

use crate::error::{CliError, Result};
use crate::logging::{LogLevel, init_logging};
use crate::workflow::{Step, run_workflow};

#[derive(Parser)]
#[command(name = "failfast-demo")]
#[command(about = "Run a four-step workflow that stops at the first failure", long_about = None)]
struct Cli {
    /// Comma-separated numbers fed to the workflow
    #[arg(long, default_value = "1,2,3")]
    input: String,

    /// Trace identifier attached to every log line (default: unknown)
    #[arg(long)]
    trace_id: Option<String>,

    /// Make the given step fail
    #[arg(long, value_enum)]
    fail_at: Option<Step>,

    /// Log level (overrides FAILFAST_LOG)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Print the step journal and counts after the run
    #[arg(long)]
    summary: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.log_level)?;

    let report = run_workflow(&cli.input, cli.trace_id.as_deref(), cli.fail_at);

    if cli.summary {
        println!("{}", report.journal.summary());
        let totals = report.metrics.totals();
        println!(
            "executed: {}, succeeded: {}, failed: {}",
            totals.executed(),
            totals.succeeded,
            totals.failed
        );
    }

    report.outcome?;

    if let Some(total) = report.saved {
        println!("saved total {total}");
    }
    Ok(())
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
