use std::path::Path;

use anyhow::{Context, Result};
use crewcal_core::Schedule;

use crate::utils::{ensure_writable, resolve_input, with_default_extension};

pub fn run(json: &Path, ical: &Path, overwrite: bool) -> Result<()> {
    let ical = with_default_extension(ical, "ics");
    ensure_writable(&ical, overwrite)?;

    let json = resolve_input(json, "json")?;

    let schedule = Schedule::from_json(&json)
        .with_context(|| format!("Failed to load schedule from {}", json.display()))?;

    let events = schedule
        .to_icalendar_file(&ical)?
        .into_result()
        .with_context(|| format!("Failed to write {}", ical.display()))?;

    println!("Converted {} duties to {}.", events, ical.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE: &str = r#"[{
        "starting_date": "2023-11-20", "starting_time": "08:30",
        "duties": ["AC862"], "summary": "YYZ - LHR", "description": "",
        "departure_airport": ["YYZ"], "departure_airport_name": ["Toronto Pearson"],
        "departure_timezone": ["America/Toronto"],
        "destination_airport": ["LHR"], "destination_airport_name": ["London Heathrow"],
        "destination_timezone": ["Europe/London"],
        "end_date": "2023-11-20", "end_time": "20:45", "crew_list": ["Jane Doe"],
        "list_times": ["08:30", "20:45"], "list_airport_codes": ["YYZ", "LHR"]
    }]"#;

    #[test]
    fn test_convert_adds_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roster.json"), SCHEDULE).unwrap();

        run(&dir.path().join("roster"), &dir.path().join("roster"), false).unwrap();

        let ics = std::fs::read_to_string(dir.path().join("roster.ics")).unwrap();
        assert!(ics.contains("SUMMARY:YYZ - LHR"));
    }

    #[test]
    fn test_convert_respects_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("roster.json");
        let ical = dir.path().join("roster.ics");
        std::fs::write(&json, SCHEDULE).unwrap();
        std::fs::write(&ical, "keep me").unwrap();

        assert!(run(&json, &ical, false).is_err());
        assert_eq!(std::fs::read_to_string(&ical).unwrap(), "keep me");

        run(&json, &ical, true).unwrap();
        assert!(std::fs::read_to_string(&ical).unwrap().starts_with("BEGIN:VCALENDAR"));
    }

    #[test]
    fn test_convert_reports_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("roster.json");
        std::fs::write(&json, SCHEDULE).unwrap();

        let err = run(&json, &dir.path().join("missing/roster.ics"), false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write"));
    }
}
