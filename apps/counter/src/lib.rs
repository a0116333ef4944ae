//! # Cafe Counter Library
//!
//! The terminal front desk: reads operator commands, drives `cafe-core`, and
//! shows a live status line for the open order.
//!
//! ## Module Organization
//! ```text
//! cafe_counter/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── config.rs       ◄─── CounterConfig from CAFE_* variables
//! ├── commands.rs     ◄─── Command parsing and the Counter session
//! ├── status.rs       ◄─── Order events → status display channel
//! └── error.rs        ◄─── AppError for commands and startup
//! ```
//!
//! ## Tasks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input loop (stdin lines)                                               │
//! │     │ parse + execute                                                   │
//! │     ▼                                                                   │
//! │  Counter ──► Checkout ──► Order ──► hub ──┬──► AuditLog (tracing)       │
//! │                                            └──► StatusForwarder         │
//! │                                                    │ mpsc               │
//! │                                                    ▼                    │
//! │                                            display task (stdout)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod status;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cafe_core::AuditLog;

use commands::{parse, Counter, Outcome, HELP};
use config::CounterConfig;
use error::AppError;
use status::StatusForwarder;

/// Runs the counter until `quit` or end of input.
///
/// ## Startup Sequence
/// 1. Initialize logging (`RUST_LOG` overrides the default filter)
/// 2. Load `CounterConfig` from the environment
/// 3. Load the menu; a broken menu file stops startup
/// 4. Spawn the status display task
/// 5. Read and execute commands
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    let config = CounterConfig::from_env();
    info!(
        store = %config.store_name,
        tax_bps = config.tax_rate.bps(),
        "Starting cafe counter"
    );
    let catalog = config.load_catalog()?;

    let (status_tx, mut status_rx) = mpsc::unbounded_channel::<String>();
    let display = tokio::spawn(async move {
        while let Some(line) = status_rx.recv().await {
            println!("  » {}", line);
        }
    });

    println!("Welcome to {}", config.store_name);
    println!("{}", HELP);

    let mut counter = Counter::new(config, catalog)
        .with_observer(Arc::new(AuditLog::new()))
        .with_observer(Arc::new(StatusForwarder::new(status_tx)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(AppError::io(format!("Failed to read input: {}", e))),
        };

        let outcome = parse(&line).and_then(|command| match command {
            Some(command) => counter.execute(command),
            None => Ok(Outcome::Reply(String::new())),
        });
        // Let pending status lines print before the reply.
        tokio::task::yield_now().await;

        match outcome {
            Ok(Outcome::Reply(text)) if text.is_empty() => {}
            Ok(Outcome::Reply(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Err(err) => {
                warn!(code = %err.code, "Command failed");
                println!("{}", err.message);
            }
        }
    }

    // Dropping the counter drops the last sender and ends the display task.
    drop(counter);
    if let Err(e) = display.await {
        warn!("Status display task failed: {}", e);
    }
    info!("Cafe counter stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cafe_core=trace` - Show trace for the core only
/// - Default: `info,cafe=debug`
///
/// Logs go to stderr so they never mix with command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cafe=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
