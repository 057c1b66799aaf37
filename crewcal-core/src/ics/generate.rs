//! ICS file generation.

use std::collections::HashSet;

use chrono::DateTime;
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Property};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::{CALENDAR_CREATOR, UID_DOMAIN};
use crate::error::CrewCalResult;
use crate::event::Event;
use crate::schedule::Schedule;

/// Build one calendar event per duty, in schedule order.
///
/// Duties that project to the same summary, description, start and end share
/// a UID and are collapsed to their first occurrence.
pub fn project_events(schedule: &Schedule) -> CrewCalResult<Vec<icalendar::Event>> {
    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(schedule.len());

    for flight in &schedule.events {
        let (uid, ics_event) = project_event(flight)?;

        if !seen.insert(uid) {
            warn!(summary = %flight.summary, "Skipping duplicate duty");
            continue;
        }

        events.push(ics_event);
    }

    debug!(events = events.len(), "Projected schedule");
    Ok(events)
}

pub fn generate_calendar(schedule: &Schedule) -> CrewCalResult<Calendar> {
    Ok(build_calendar(project_events(schedule)?))
}

/// Generate .ics content for a whole schedule
pub fn generate_ics(schedule: &Schedule) -> CrewCalResult<String> {
    Ok(render(project_events(schedule)?))
}

/// Serialize projected events into a calendar document.
pub fn render(events: Vec<icalendar::Event>) -> String {
    strip_ics_bloat(&build_calendar(events).to_string())
}

fn build_calendar(events: Vec<icalendar::Event>) -> Calendar {
    let mut cal = Calendar::new();
    for event in events {
        cal.push(event);
    }
    cal.done()
}

fn project_event(flight: &Event) -> CrewCalResult<(String, icalendar::Event)> {
    let begin = flight.begin()?;
    let end = flight.end()?;
    let description = flight.describe()?;
    let uid = event_uid(&flight.summary, &description, &begin, &end);

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&uid);
    ics_event.summary(&flight.summary);
    ics_event.description(&description);

    add_zoned_datetime(&mut ics_event, "DTSTART", &begin);
    add_zoned_datetime(&mut ics_event, "DTEND", &end);

    Ok((uid, ics_event.done()))
}

/// Stable UID derived from everything that ends up in the VEVENT
fn event_uid(summary: &str, description: &str, begin: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    let name = format!(
        "{summary}\u{1f}{description}\u{1f}{}\u{1f}{}",
        begin.to_rfc3339(),
        end.to_rfc3339()
    );
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
    format!("{id}@{UID_DOMAIN}")
}

/// Local wall-clock time with a TZID parameter
fn add_zoned_datetime(ics_event: &mut icalendar::Event, name: &str, datetime: &DateTime<Tz>) {
    let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", datetime.timezone().name());
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with the crewcal creator
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(CALENDAR_CREATOR);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_test_event;

    /// Undo RFC 5545 line folding so assertions can see whole properties
    fn unfold(ics: &str) -> String {
        ics.replace("\r\n ", "").replace("\r\n\t", "")
    }

    fn make_test_schedule() -> Schedule {
        let mut second = make_test_event();
        second.summary = "YYZ - YUL".to_string();
        second.starting_date = "2023-11-25".to_string();
        second.starting_time = "06:15".to_string();
        second.end_date = "2023-11-25".to_string();
        second.destination_timezone =
            vec!["Europe/London".to_string(), "America/Montreal".to_string()];

        Schedule::new(vec![make_test_event(), second])
    }

    #[test]
    fn test_generate_ics_one_vevent_per_duty() {
        let ics = generate_ics(&make_test_schedule()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("END:VEVENT").count(), 2);
    }

    #[test]
    fn test_generate_ics_keeps_schedule_order() {
        let ics = unfold(&generate_ics(&make_test_schedule()).unwrap());

        let first = ics.find("SUMMARY:YYZ - LHR - YYZ").expect("first duty");
        let second = ics.find("SUMMARY:YYZ - YUL").expect("second duty");
        assert!(first < second);
    }

    #[test]
    fn test_generate_ics_zoned_times() {
        let ics = unfold(&generate_ics(&make_test_schedule()).unwrap());

        assert!(
            ics.contains("DTSTART;TZID=America/Toronto:20231120T083000"),
            "DTSTART should carry TZID. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;TZID=America/Toronto:20231122T170500"),
            "DTEND should use the last listed time. ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTEND;TZID=America/Montreal:20231125T170500"));
    }

    #[test]
    fn test_generate_ics_metadata() {
        let ics = generate_ics(&make_test_schedule()).unwrap();

        assert!(ics.contains(&format!("PRODID:{CALENDAR_CREATOR}\r\n")));
        assert!(!ics.contains("CALSCALE"));
        assert!(!ics.contains("ICALENDAR-RS"));
        assert!(ics.contains("DTSTAMP:"));
    }

    #[test]
    fn test_generate_ics_description() {
        let ics = unfold(&generate_ics(&make_test_schedule()).unwrap());

        let description = ics
            .lines()
            .find(|l| l.starts_with("DESCRIPTION:"))
            .expect("Should have DESCRIPTION line");
        assert!(description.starts_with("DESCRIPTION:AC862: Toronto Pearson - London Heathrow"));
        assert!(ics.contains("Jane Doe"));
        assert!(ics.contains("Flight ends in America/Toronto timezone."));
    }

    #[test]
    fn test_project_events_collapses_duplicates() {
        let schedule = Schedule::new(vec![make_test_event(), make_test_event()]);

        let events = project_events(&schedule).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_event_uid_is_stable() {
        let a = generate_ics(&make_test_schedule()).unwrap();
        let b = generate_ics(&make_test_schedule()).unwrap();

        let uids = |ics: &str| -> Vec<String> {
            ics.lines()
                .filter(|l| l.starts_with("UID:"))
                .map(str::to_string)
                .collect()
        };
        assert_eq!(uids(&a), uids(&b));
        assert_eq!(uids(&a).len(), 2);
        assert!(uids(&a)[0].ends_with("@crewcal"));
    }

    #[test]
    fn test_generate_ics_empty_schedule() {
        let ics = generate_ics(&Schedule::default()).unwrap();

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
