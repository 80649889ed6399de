//! Diagnostic logging to stderr.
//!
//! Command output goes to stdout with `println!`; this is only for the
//! `tracing` events emitted by the store and exporters. Set `RUST_LOG`
//! (e.g. `RUST_LOG=quickclaims=debug`) to see more than warnings.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
