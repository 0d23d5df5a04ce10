//! Render the orbiting-pair animation and print a per-frame summary.
//!
//! Reads a TOML configuration if a path is given, otherwise uses the
//! built-in `+1`/`-1` pair orbiting the origin.
//!
//! Run with:
//!   cargo run --example orbiting_pair -- [config.toml]
//!
//! Set `RUST_LOG=quiver_engine=debug` for per-frame logging.

use quiver_engine::{FieldAnimation, SimulationConfig};
use quiver_field::SummarySink;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load_or_default(path),
        None => SimulationConfig::default(),
    };

    let mut animation = FieldAnimation::new(&config)?;
    let mut sink = SummarySink::new();
    let summary = animation.run(&mut sink)?;

    println!("{:>6} {:>8} {:>14} {:>14} {:>14}", "step", "t", "max |E|", "max |div|", "max |curl|");
    for frame in sink.frames().iter().step_by(10) {
        println!(
            "{:>6} {:>8.3} {:>14.6e} {:>14.6e} {:>14.6e}",
            frame.step.0,
            frame.timestamp,
            frame.max_field_magnitude,
            frame.max_abs_divergence,
            frame.max_abs_curl
        );
    }
    println!(
        "{} frames in {:.1} ms, last digest {:016x}",
        summary.frames,
        summary.elapsed_us as f64 / 1000.0,
        summary.last_digest.unwrap_or_default()
    );
    Ok(())
}
