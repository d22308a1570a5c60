//! Generate pump-house documents, submit them to the content server, and
//! write one JSON artifact per document.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use content_loader::config::{DEFAULT_OUTPUT_DIR, LoaderSettings};
use content_loader::dataset::generate_dataset;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `generate-documents` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "generate-documents",
    about = "Generate synthetic pump-house documents and load them into the content server",
    version
)]
struct CliArgs {
    /// Number of documents to generate.
    #[arg(long, value_name = "n", default_value_t = 5)]
    count: usize,
    /// Directory receiving one JSON file per document.
    #[arg(long = "output-dir", value_name = "path", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Use simulated identifiers instead of contacting the content server.
    #[arg(long)]
    offline: bool,
    /// Emit logs as JSON lines.
    #[arg(long = "json-logs")]
    json_logs: bool,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    init_tracing(args.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(args))
}

fn init_tracing(json_logs: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let installed = if json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = installed {
        warn!(error = %error, "tracing init failed");
    }
}

async fn async_main(args: CliArgs) -> io::Result<()> {
    let mut settings = LoaderSettings::load_from_iter([OsString::from("generate-documents")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    settings.offline |= args.offline;

    let report = generate_dataset(&settings, args.count, &args.output_dir, &DefaultClock)
        .await
        .map_err(|error| io::Error::other(format!("generate documents: {error}")))?;

    let mut stdout = io::stdout().lock();
    for document in report.documents() {
        writeln!(
            stdout,
            "{}\t{}\t{}",
            document.document_id,
            document.class,
            document.artifact_path.display()
        )?;
    }
    writeln!(
        stdout,
        "generated={} fallbacks={} output_dir={}",
        report.documents().len(),
        report.fallback_count(),
        args.output_dir.display()
    )?;
    Ok(())
}
