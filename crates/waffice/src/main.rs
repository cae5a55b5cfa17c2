use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waffice::cli::Cli;
use waffice::output::OutputDestination;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rendered = match waffice::run(&cli) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let destination = OutputDestination::from_arg(cli.out.clone());
    if let Err(err) = destination.write_text(&rendered) {
        eprintln!("error: failed to write output: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

// Logs go to stderr so structured output on stdout stays parseable.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "waffice=info,waffice_listview=info",
        1 => "waffice=debug,waffice_listview=debug",
        _ => "waffice=trace,waffice_listview=trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
