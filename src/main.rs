//! corelayer CLI entry point
//!
//! Parses the command line, runs the compiler and turns any failure into a
//! colored error report with a suggestion, exiting with status 1.

use anyhow::Result;
use clap::Parser;
use corelayer::cli;
use corelayer::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
