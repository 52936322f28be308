//! # simdupe CLI
//!
//! Command-line demonstration of the similarity engine.
//!
//! ## Usage
//! ```bash
//! simdupe scan ~/Photos --level 2
//! simdupe compare-dirs ~/Photos ~/Backup
//! simdupe compare a.jpg b.jpg
//! ```

mod cli;

use simdupe::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    cli::run()
}
