use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crewcal_core::{CommandExtractor, CrewcalConfig, Extractor, extract_schedule, pdf};
use owo_colors::OwoColorize;
use tracing::warn;

use crate::utils::{ensure_writable, resolve_input, with_default_extension};

pub async fn run(
    source: &Path,
    target: &Path,
    to_json: bool,
    overwrite: bool,
    hotels: Option<Option<PathBuf>>,
) -> Result<()> {
    let config = CrewcalConfig::load()?;

    let target = with_default_extension(target, if to_json { "json" } else { "ics" });
    ensure_writable(&target, overwrite)?;

    let source = resolve_input(source, "pdf")?;
    let text = pdf::document_text(&source, &config)
        .await
        .with_context(|| format!("Failed to read {}", source.display()))?;

    let extractor = CommandExtractor::from_config(&config);
    println!(
        "Extracting schedule with {}, saving to {} format.",
        extractor.name(),
        if to_json { "crewcal json" } else { "iCalendar" }
    );

    let events = extract_to(&extractor, &text, &target, to_json).await?;
    println!("Extracted {} duties, saved to {}.", events, target.display());

    if let Some(dir) = hotels {
        let dir = dir
            .or_else(|| config.hotel_dir.clone())
            .or_else(|| target.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        write_hotels(&extractor, &text, &dir).await?;
    }

    Ok(())
}

/// Extract and write the schedule, returning the number of duties.
async fn extract_to<E: Extractor>(
    extractor: &E,
    text: &str,
    target: &Path,
    to_json: bool,
) -> Result<usize> {
    let extraction = extract_schedule(extractor, text).await?;

    if to_json {
        extraction.save_raw_json(target)?;
        return Ok(extraction.schedule.len());
    }

    let events = extraction
        .schedule
        .to_icalendar_file(target)?
        .into_result()
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(events)
}

async fn write_hotels<E: Extractor>(extractor: &E, text: &str, dir: &Path) -> Result<()> {
    let hotels = extractor.extract_hotels(text).await?;

    if hotels.is_empty() {
        println!("{}", "No hotels found.".dimmed());
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for hotel in &hotels {
        match hotel.write_to(dir) {
            Ok(path) => println!("Hotel contact saved to {}.", path.display()),
            Err(e) => warn!(file = %hotel.vcf_file_name, error = %e, "Skipping hotel"),
        }
    }

    Ok(())
}
