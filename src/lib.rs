pub mod config;
pub mod deserializers;
pub mod engine;
pub mod error;
pub mod server;
pub mod utils;
pub mod validation;

pub use engine::SymptomChecker;
pub use error::{Result, TriageError};

/// Load `.env` from the working directory or its ancestors; a missing file is ignored.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
