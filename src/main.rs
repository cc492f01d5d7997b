//! Housing estimate CLI.
//!
//! Reads RSVP form state as JSON from the file named on the command line
//! (or stdin) and prints the estimate the form would show.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use housing_estimate::config::AppConfig;
use housing_estimate::pricing::{compute_cost, JsonFormSource, WriterSink};

fn init_tracing() {
    // RUST_LOG controls the level (e.g. RUST_LOG=housing_estimate=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env();
    let rules = config
        .pricing_rules()
        .context("Failed to load pricing rules")?;

    let source = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
            JsonFormSource::from_reader(file)?
        }
        None => JsonFormSource::from_reader(io::stdin().lock())?,
    };

    let mut sink = WriterSink::new(io::stdout().lock());
    compute_cost(&source, &rules, &mut sink).context("Failed to compute estimate")?;

    Ok(())
}
