//! # Patron Console Library
//!
//! Host for the customer list and the add-customer dialog.
//! `main.rs` only calls [`run`]; everything else lives here for testability.
//!
//! ## Module Organization
//! ```text
//! patron_console_lib/
//! ├── lib.rs            ◄─── You are here (CLI, tracing, startup)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports, lock helper
//! │   ├── customers.rs  ◄─── CustomerListStore (cached list)
//! │   ├── add_customer.rs ◄─ AddCustomerFlow (dialog state machine)
//! │   ├── feedback.rs   ◄─── FeedbackCue (invalid-submit timer)
//! │   └── config.rs     ◄─── PatronConfig
//! ├── commands/
//! │   ├── mod.rs        ◄─── Console wiring, ListDialog callbacks
//! │   └── customers.rs  ◄─── list / add
//! ├── view.rs           ◄─── Plain-text list renderer
//! └── error.rs          ◄─── AppError, FlowError
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use patron_api::HttpCustomerApi;
use patron_core::CustomerDraft;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use commands::{customers, Console};
use error::AppResult;
use state::PatronConfig;

/// Command line of the `patron` binary.
#[derive(Debug, Parser)]
#[command(name = "patron", version, about = "List and add customers")]
pub struct Cli {
    /// Path to patron.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the customer list
    List,

    /// Add a customer and show the updated list
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        business_name: String,
    },

    /// Write the current configuration to patron.toml
    Init,
}

/// Runs the console.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,patron=debug,reqwest=warn; RUST_LOG overrides       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → patron.toml → PATRON_* env → validate                  │
/// │     • init: defaults → PATRON_* env → save, then stop                   │
/// │                                                                         │
/// │  3. Build HTTP Client ────────────────────────────────────────────────► │
/// │     • base URL + optional request timeout                               │
/// │                                                                         │
/// │  4. Wire State ───────────────────────────────────────────────────────► │
/// │     • CustomerListStore + AddCustomerFlow (callbacks into the store)    │
/// │                                                                         │
/// │  5. Execute Subcommand ───────────────────────────────────────────────► │
/// │     • list: load + render                                               │
/// │     • add:  load + submit + render                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    init_tracing();

    info!("Starting Patron console");

    if let Command::Init = cli.command {
        let path = cli.config.or_else(PatronConfig::default_config_path);
        PatronConfig::from_env()?.save(path.clone())?;
        if let Some(path) = path {
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let config = PatronConfig::load(cli.config)?;
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let api = Arc::new(HttpCustomerApi::new(config.client_config())?);
    let console = Console::new(api, config.feedback_delay());

    match cli.command {
        Command::List => {
            print!("{}", customers::list_customers(&console).await);
        }
        Command::Add {
            first_name,
            last_name,
            email,
            business_name,
        } => {
            let draft = CustomerDraft::new(first_name, last_name, business_name, email);
            if let Err(e) = customers::add_customer(&console, &draft).await {
                error!(error = %e, "Add customer failed");
                if e.is_retryable() {
                    warn!("The customer API may be temporarily unavailable; the same command can be retried");
                }
                return Err(e);
            }
            print!("{}", view::render_list(&console.store.snapshot()));
        }
        Command::Init => {}
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=patron=trace` - Show trace for patron crates only
/// - Default: INFO, DEBUG for patron crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,patron=debug,reqwest=warn"));

    // Logs go to stderr so the rendered list stays clean on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::parse_from([
            "patron",
            "--config",
            "/tmp/patron.toml",
            "add",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "ada@x.io",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/patron.toml")));
        match cli.command {
            Command::Add {
                first_name,
                business_name,
                ..
            } => {
                assert_eq!(first_name, "Ada");
                assert_eq!(business_name, "");
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_init() {
        let cli = Cli::parse_from(["patron", "init", "--config", "/tmp/patron.toml"]);

        assert!(matches!(cli.command, Command::Init));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/patron.toml")));
    }

    #[tokio::test]
    async fn test_init_writes_config_file() {
        let path = std::env::temp_dir()
            .join(format!("patron-init-{}", uuid::Uuid::new_v4()))
            .join("patron.toml");

        let cli = Cli::parse_from(["patron", "init", "--config", path.to_str().unwrap()]);
        run(cli).await.unwrap();

        let loaded = PatronConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded, PatronConfig::from_env().unwrap());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_cli_requires_email_for_add() {
        let parsed = Cli::try_parse_from([
            "patron",
            "add",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
        ]);
        assert!(parsed.is_err());
    }
}
