// ============================================================================
// Basic Usage Example
// ============================================================================

use chrono::{TimeDelta, TimeZone, Utc};
use iso_period::prelude::*;

fn main() -> Result<(), PeriodError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== ISO Period Example ===\n");

    // Normalisation
    let raw = Period::new(0, 14, 0, 25, 61, 125)?;
    println!("raw:                 {}", raw);
    println!("precise normalise:   {}", raw.normalise(true)?);
    println!("imprecise normalise: {}", raw.normalise(false)?);

    // Fractions move to the finest field
    let fractional = Period::from_tenths(25, 10, 0, 0, 0, 0)?;
    println!("\n{} normalises to {}", fractional, fractional.normalise(true)?);

    // Durations
    println!("\nDurations:");
    for d in [
        TimeDelta::minutes(135),
        TimeDelta::days(200),
        TimeDelta::days(5000),
    ] {
        let (p, precise) = Period::from_duration(d)?;
        println!("  {:>12}s -> {:<16} precise: {}", d.num_seconds(), p.to_string(), precise);
    }

    // Timestamps
    let start = Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 3, 2, 6, 30, 0).unwrap();
    let between = Period::between(&start, &end)?;
    println!("\n{} .. {} = {}", start, end, between);

    let (later, precise) = Period::new_ymd(0, 1, 0)?.add_to(start)?;
    println!("{} + P1M = {} (precise: {})", start, later, precise);

    // Scaling
    let p = Period::new_hms(10, 0, 0)?;
    println!("\n{} x 0.3 = {}", p, p.scale(0.3)?);
    println!("{} x 2.5 = {}", p, p.scale(2.5)?);

    // Overflow is an error, never a wrapped value
    match Period::new_ymd(3000, 0, 0)?.scale(2.0) {
        Ok(p) => println!("\nunexpected: {}", p),
        Err(e) => println!("\noverflow: {}", e),
    }

    Ok(())
}
