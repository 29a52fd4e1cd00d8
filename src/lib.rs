pub mod client;
pub mod config;
pub mod error;
pub mod mentor;
pub mod models;
pub mod modes;
pub mod prompt;
pub mod server;
pub mod transport;
pub mod validation;

pub use error::{MentorError, Result};
pub use modes::MentorMode;

/// Initialize tracing to stderr, honouring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}
