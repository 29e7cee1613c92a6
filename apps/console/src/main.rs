//! # Patron Console Entry Point
//!
//! ```text
//! patron [--config <path>] list
//! patron [--config <path>] add --first-name <..> --last-name <..> --email <..> [--business-name <..>]
//! patron [--config <path>] init
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use clap::Parser;
use patron_console_lib::error::AppResult;
use patron_console_lib::{run, Cli};

#[tokio::main]
async fn main() -> AppResult<()> {
    run(Cli::parse()).await
}
