// Main library entry point for SharpCraft.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use tracing_subscriber::EnvFilter;

/// Installs the `tracing` subscriber. `RUST_LOG` wins over the default
/// `sharpcraft=info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sharpcraft=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
