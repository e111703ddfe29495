//! psg-check: runs the canonical conformance scenario against the behavioral
//! device model.
//!
//! Usage: `psg-check [timing-profile.json]`
//!
//! Without arguments the default timing profile is used (16 ticks per serial
//! bit-clock, 512 per frame, 100 per bus phase). A JSON file overrides it:
//!
//! ```json
//! { "sclk_divide_bits": 4, "lrck_divide_bits": 5, "bus_delay_cycles": 100 }
//! ```
//!
//! `PSG_LOG` selects the log level (`debug` shows bus traffic, `trace`
//! per-bit samples).

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

use psg_harness::sim::SimPsg;
use psg_harness::{TimingProfile, ToneScenario};

fn setup_logging() {
    let level = std::env::var("PSG_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn load_timing(path: &str) -> Result<TimingProfile> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading timing profile {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing timing profile {path}"))
}

fn main() -> Result<()> {
    setup_logging();

    let timing = match std::env::args().nth(1) {
        Some(path) => load_timing(&path)?,
        None => TimingProfile::default(),
    };

    let scenario = ToneScenario::lock_on_left(timing);
    let mut dev = SimPsg::new(timing);
    scenario
        .run(&mut dev)
        .context("conformance scenario failed")?;

    println!("conformance scenario passed ({} ticks)", dev.total_ticks());
    Ok(())
}
