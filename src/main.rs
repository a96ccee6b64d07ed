//! oci-transcribe CLI entry point.

use clap::Parser;
use oci_transcribe::cli::{parse_exit_code, run_transcribe, Cli, Output};
use oci_transcribe::config::Settings;
use oci_transcribe::TranscribeError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(e.kind()));
        }
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("oci_transcribe={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli).await {
        report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::load_from(cli.config.as_ref())?;
    run_transcribe(cli, settings).await
}

fn report_error(err: &anyhow::Error) {
    Output::error(&err.to_string());
    if let Some(hint) = err.downcast_ref::<TranscribeError>().and_then(|e| e.hint()) {
        Output::hint(&hint);
    }
}
