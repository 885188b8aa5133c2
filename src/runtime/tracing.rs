//! # Tracing Setup
//!
//! Structured logging for the whole service through `tracing-subscriber`.
//!
//! `RUST_LOG` wins when it is set; otherwise the configured `telemetry.log_level` applies.
//!
//! ```bash
//! RUST_LOG=info cargo run                          # lifecycle and order events
//! RUST_LOG=debug cargo run                         # every request and payload
//! RUST_LOG=order_service=debug,sqlx=warn cargo run
//! ```
//!
//! A create with `RUST_LOG=info` reads roughly like this:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! INFO Actor started entity_type="Order"
//! INFO Order controller started
//! INFO create:insert: Created entity_type="Order" id=5f1c... size=1
//! INFO create: Order created order_id=5f1c... total_amount=25 total_items=3 items=2
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, before the system starts.
pub fn setup_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type and command fields say where a line comes from
        .compact()
        .init();
}
