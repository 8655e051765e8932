use amendguard::cli::{Cli, OutputFormat};
use amendguard::{evaluate, Report};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Usage errors must not abort the commit, so never let clap pick the code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);

    let report = evaluate(&cli.invocation());
    emit(&report, cli.format);

    ExitCode::from(report.exit_code() as u8)
}

fn emit(report: &Report, format: OutputFormat) {
    match format {
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("amendguard: failed to encode report: {}", e),
        },
        OutputFormat::Text if report.is_diagnostic() => eprintln!("{}", report.render_text()),
        OutputFormat::Text => println!("{}", report.render_text()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "amendguard=debug"
    } else {
        "amendguard=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("AMENDGUARD_LOG").unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
