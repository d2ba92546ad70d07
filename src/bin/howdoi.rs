//! howdoi command-line entry point.

use clap::Parser;
use howdoi::{Cli, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout only carries answers.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("howdoi=warn,howdoi_search=warn")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let mut stdout = std::io::stdout().lock();
    howdoi::run(&cli, &settings, &mut stdout).await?;
    Ok(())
}
