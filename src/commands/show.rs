use std::path::Path;

use anyhow::{Context, Result};
use crewcal_core::Schedule;
use owo_colors::OwoColorize;

use crate::utils::resolve_input;

pub fn run(json: &Path) -> Result<()> {
    let json = resolve_input(json, "json")?;
    let schedule = Schedule::from_json(&json)
        .with_context(|| format!("Failed to load schedule from {}", json.display()))?;

    println!("{}", schedule.json_dumps()?);
    println!();

    for event in &schedule.events {
        let begin = event.begin()?;
        let end = event.end()?;

        println!(
            "{}  {} → {}",
            event.summary.bold(),
            begin.format("%Y-%m-%d %H:%M %Z"),
            end.format("%Y-%m-%d %H:%M %Z")
        );
        for leg in event.legs() {
            println!(
                "   {} {} → {}",
                leg.flight,
                leg.departure.code,
                leg.destination.code
            );
        }
    }

    println!("\n{} duties", schedule.len());

    Ok(())
}
