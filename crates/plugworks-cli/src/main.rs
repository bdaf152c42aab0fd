//! Plugworks CLI entry point.
//!
//! Exit code 0 means the command succeeded; a failed verification or any
//! other error exits 1, so the binary can gate provisioning scripts.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    // Diagnostics stay quiet unless RUST_LOG asks for them; the report
    // lines the commands print are the real output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
