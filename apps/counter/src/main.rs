//! # Cafe Counter Entry Point
//!
//! Front-desk terminal for taking cafe orders.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Load the menu catalog (file or built-in sample)
//! 4. Spawn the status display task
//! 5. Read operator commands until `quit` or end of input

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = cafe_counter::run().await {
        eprintln!("cafe-counter: {}", err);
        std::process::exit(1);
    }
}
