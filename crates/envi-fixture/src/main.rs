use anyhow::{Context, Result};
use clap::Parser;
use envi_core::{write_fixture, DEFAULT_FIXTURE_PATH};

/// Writes `binary.data`: a byte-order marker followed by one tagged value
/// per ENVI data type, all in the host's native byte order.
#[derive(Parser, Debug)]
#[command(version, about = "ENVI binary fixture generator")]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    println!("creating {}", DEFAULT_FIXTURE_PATH);
    let report = write_fixture(DEFAULT_FIXTURE_PATH)
        .with_context(|| format!("Failed to write fixture {}", DEFAULT_FIXTURE_PATH))?;

    println!("native byte order = {}", report.byte_order);
    for value in &report.records {
        println!("{} {}", value, value.data_type());
    }
    println!("Done: {:?} ({} bytes)", report.path, report.size);
    Ok(())
}
