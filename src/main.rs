use clap::Parser;
use grafana_export::cli::{Cli, render_summary};
use grafana_export::{DashboardExporter, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!(code = e.error_code(), "run aborted");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let exporter = DashboardExporter::new(cli.into_config())?;
    let summary = exporter.run().await?;

    println!("{}", render_summary(&summary.export));
    if let Some(archive) = &summary.archive {
        println!("Archive: {}", archive.display());
    }
    if let Some(upload) = &summary.upload {
        println!("Uploaded to s3://{}/{}", upload.bucket, upload.key);
    }
    Ok(())
}
