//! Command definitions and dispatch.

pub mod catalog;
pub mod verify;

use clap::{Parser, Subcommand};

use plugworks_core::AppError;

use crate::output::OutputFormat;

/// Plugworks framework inspection and verification
#[derive(Debug, Parser)]
#[command(name = "plugworks", version, about, long_about = None)]
pub struct Cli {
    /// Output format for listing commands
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that every expected framework service resolves
    Verify(verify::VerifyArgs),
    /// List the framework services a complete host provides
    Catalog,
}

impl Cli {
    /// Runs the selected subcommand.
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Verify(args) => verify::execute(args).await,
            Commands::Catalog => catalog::execute(self.format).await,
        }
    }
}
