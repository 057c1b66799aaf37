//! Crew duty events.
//!
//! An [`Event`] is one duty period as extracted from a crew schedule: one or
//! more flight legs with their airports, timezones, crew and the raw times
//! seen in the document. Field names match the JSON produced by the extractor.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CrewCalError, CrewCalResult};
use crate::time;

/// A duty on a crew member's flight schedule.
///
/// Plain deserialization does not check that the departure and destination
/// sequences line up. Use [`Event::from_value`] (or [`Schedule`] loading,
/// which goes through it) to get a validated event, or call
/// [`Event::validate`] afterwards.
///
/// [`Schedule`]: crate::Schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Departure date, `yyyy-mm-dd`
    pub starting_date: String,
    /// Departure time, `HH:mm`
    pub starting_time: String,
    /// Flight numbers, in duty order
    pub duties: Vec<String>,
    pub summary: String,
    pub description: String,

    // One entry per leg, index-aligned with `duties`
    pub departure_airport: Vec<String>,
    pub departure_airport_name: Vec<String>,
    /// IANA identifiers, e.g. "America/Toronto"
    pub departure_timezone: Vec<String>,
    pub destination_airport: Vec<String>,
    pub destination_airport_name: Vec<String>,
    pub destination_timezone: Vec<String>,

    /// Arrival date of the final leg
    pub end_date: String,
    pub end_time: String,
    pub crew_list: Vec<String>,
    /// Every `HH:mm` time seen for the duty, in extraction order
    pub list_times: Vec<String>,
    pub list_airport_codes: Vec<String>,

    /// Explicit arrival time (`HH:mm`) of the final leg.
    /// Takes precedence over the last entry of `list_times`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

/// One end of a flight leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airport<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub timezone: &'a str,
}

/// A single flight within a duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<'a> {
    pub flight: &'a str,
    pub departure: Airport<'a>,
    pub destination: Airport<'a>,
}

impl Event {
    /// Build a validated event from an untyped JSON element.
    ///
    /// `index` is the element's position in the source array and is reported
    /// in the [`CrewCalError::Validation`] error.
    pub fn from_value(index: usize, value: Value) -> CrewCalResult<Self> {
        let event: Event = serde_json::from_value(value)
            .map_err(|e| CrewCalError::validation(index, e.to_string()))?;

        event
            .validate()
            .map_err(|message| CrewCalError::validation(index, message))?;

        Ok(event)
    }

    /// Check the parallel airport sequences line up.
    pub fn validate(&self) -> Result<(), String> {
        check_aligned(
            "departure",
            &self.departure_airport,
            &self.departure_airport_name,
            &self.departure_timezone,
        )?;
        check_aligned(
            "destination",
            &self.destination_airport,
            &self.destination_airport_name,
            &self.destination_timezone,
        )
    }

    pub fn departures(&self) -> Vec<Airport<'_>> {
        airports(
            &self.departure_airport,
            &self.departure_airport_name,
            &self.departure_timezone,
        )
    }

    pub fn destinations(&self) -> Vec<Airport<'_>> {
        airports(
            &self.destination_airport,
            &self.destination_airport_name,
            &self.destination_timezone,
        )
    }

    /// Flight legs, pairing each flight number with its airports.
    /// Stops at the shortest of `duties` and the airport sequences.
    pub fn legs(&self) -> Vec<Leg<'_>> {
        self.duties
            .iter()
            .zip(self.departures())
            .zip(self.destinations())
            .map(|((flight, departure), destination)| Leg {
                flight,
                departure,
                destination,
            })
            .collect()
    }

    /// One `"{flight}: {departure} - {destination}"` line per flight.
    ///
    /// Pairs `duties` with the departure and destination airport names by
    /// position. Trailing entries of the longer sequences are dropped, so a
    /// misaligned extraction silently loses legs here.
    pub fn list_airport_pairs(&self) -> String {
        self.duties
            .iter()
            .zip(&self.departure_airport_name)
            .zip(&self.destination_airport_name)
            .map(|((flight, dep), dest)| format!("{flight}: {dep} - {dest}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Calendar description: the flights, the crew, then the arrival timezone.
    pub fn describe(&self) -> CrewCalResult<String> {
        let arrival_tz = self.arrival_timezone()?;

        let mut lines = vec![self.list_airport_pairs()];
        lines.extend(self.crew_list.iter().cloned());
        lines.push(format!("\nFlight ends in {arrival_tz} timezone."));

        Ok(lines.join("\n"))
    }

    /// Start of the duty: `starting_date starting_time` in the first
    /// departure timezone.
    pub fn begin(&self) -> CrewCalResult<DateTime<Tz>> {
        let tz = self
            .departure_timezone
            .first()
            .ok_or(CrewCalError::EmptySequence("departure_timezone"))?;

        time::resolve(&self.starting_date, &self.starting_time, tz)
    }

    /// End of the duty: `end_date` at the arrival time, in the last
    /// destination timezone.
    ///
    /// Without an explicit `arrival_time` the last entry of `list_times` is
    /// taken as the arrival, which relies on the extractor listing times in
    /// chronological order.
    pub fn end(&self) -> CrewCalResult<DateTime<Tz>> {
        let arrival = match &self.arrival_time {
            Some(arrival) => arrival,
            None => self
                .list_times
                .last()
                .ok_or(CrewCalError::EmptySequence("list_times"))?,
        };

        time::resolve(&self.end_date, arrival, self.arrival_timezone()?)
    }

    fn arrival_timezone(&self) -> CrewCalResult<&str> {
        self.destination_timezone
            .last()
            .map(String::as_str)
            .ok_or(CrewCalError::EmptySequence("destination_timezone"))
    }
}

fn check_aligned(
    side: &str,
    codes: &[String],
    names: &[String],
    timezones: &[String],
) -> Result<(), String> {
    if codes.len() == names.len() && names.len() == timezones.len() {
        return Ok(());
    }

    Err(format!(
        "{side} airports are misaligned: {} codes, {} names, {} timezones",
        codes.len(),
        names.len(),
        timezones.len()
    ))
}

fn airports<'a>(
    codes: &'a [String],
    names: &'a [String],
    timezones: &'a [String],
) -> Vec<Airport<'a>> {
    codes
        .iter()
        .zip(names)
        .zip(timezones)
        .map(|((code, name), timezone)| Airport {
            code,
            name,
            timezone,
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde_json::json;

    pub(crate) fn make_test_event() -> Event {
        Event {
            starting_date: "2023-11-20".to_string(),
            starting_time: "08:30".to_string(),
            duties: vec!["AC862".to_string(), "AC863".to_string()],
            summary: "YYZ - LHR - YYZ".to_string(),
            description: String::new(),
            departure_airport: vec!["YYZ".to_string(), "LHR".to_string()],
            departure_airport_name: vec![
                "Toronto Pearson".to_string(),
                "London Heathrow".to_string(),
            ],
            departure_timezone: vec!["America/Toronto".to_string(), "Europe/London".to_string()],
            destination_airport: vec!["LHR".to_string(), "YYZ".to_string()],
            destination_airport_name: vec![
                "London Heathrow".to_string(),
                "Toronto Pearson".to_string(),
            ],
            destination_timezone: vec!["Europe/London".to_string(), "America/Toronto".to_string()],
            end_date: "2023-11-22".to_string(),
            end_time: "17:05".to_string(),
            crew_list: vec!["Jane Doe".to_string(), "Sam Smith".to_string()],
            list_times: vec![
                "08:30".to_string(),
                "20:45".to_string(),
                "14:10".to_string(),
                "17:05".to_string(),
            ],
            list_airport_codes: vec!["YYZ".to_string(), "LHR".to_string()],
            arrival_time: None,
        }
    }

    #[test]
    fn test_from_value_missing_field() {
        let mut value = serde_json::to_value(make_test_event()).unwrap();
        value.as_object_mut().unwrap().remove("crew_list");

        let err = Event::from_value(3, value).unwrap_err();
        match err {
            CrewCalError::Validation { index, message } => {
                assert_eq!(index, 3);
                assert!(message.contains("crew_list"), "message: {message}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_value_wrong_primitive_type() {
        let mut value = serde_json::to_value(make_test_event()).unwrap();
        value["duties"] = json!("AC862");

        let err = Event::from_value(0, value).unwrap_err();
        assert!(matches!(err, CrewCalError::Validation { index: 0, .. }));

        let mut value = serde_json::to_value(make_test_event()).unwrap();
        value["summary"] = json!(["YYZ", "LHR"]);

        assert!(Event::from_value(0, value).is_err());
    }

    #[test]
    fn test_from_value_misaligned_airports() {
        let mut value = serde_json::to_value(make_test_event()).unwrap();
        value["destination_timezone"] = json!(["Europe/London"]);

        let err = Event::from_value(1, value).unwrap_err();
        match err {
            CrewCalError::Validation { message, .. } => {
                assert!(message.starts_with("destination"), "message: {message}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_deserialize_needs_validate() {
        let mut value = serde_json::to_value(make_test_event()).unwrap();
        value["departure_airport_name"] = json!([]);

        let event: Event = serde_json::from_value(value.clone()).unwrap();
        let message = event.validate().unwrap_err();
        assert!(message.starts_with("departure"), "message: {message}");
        assert!(Event::from_value(0, value).is_err());
    }

    #[test]
    fn test_from_value_ignores_unknown_fields() {
        let mut value = serde_json::to_value(make_test_event()).unwrap();
        value["hotel"] = json!("Sheraton");

        assert_eq!(Event::from_value(0, value).unwrap(), make_test_event());
    }

    #[test]
    fn test_list_airport_pairs() {
        let event = make_test_event();

        assert_eq!(
            event.list_airport_pairs(),
            "AC862: Toronto Pearson - London Heathrow\nAC863: London Heathrow - Toronto Pearson"
        );
    }

    #[test]
    fn test_list_airport_pairs_truncates_to_shortest() {
        let mut event = make_test_event();
        event.duties.push("AC999".to_string());
        event.destination_airport_name.truncate(1);

        let pairs = event.list_airport_pairs();
        assert_eq!(pairs.lines().count(), 1);
        assert_eq!(pairs, "AC862: Toronto Pearson - London Heathrow");
    }

    #[test]
    fn test_describe() {
        let event = make_test_event();

        assert_eq!(
            event.describe().unwrap(),
            "AC862: Toronto Pearson - London Heathrow\n\
             AC863: London Heathrow - Toronto Pearson\n\
             Jane Doe\n\
             Sam Smith\n\
             \n\
             Flight ends in America/Toronto timezone."
        );
    }

    #[test]
    fn test_describe_without_destination_timezone() {
        let mut event = make_test_event();
        event.destination_timezone.clear();

        let err = event.describe().unwrap_err();
        assert!(matches!(err, CrewCalError::EmptySequence("destination_timezone")));
    }

    #[test]
    fn test_begin_uses_first_departure_timezone() {
        let event = make_test_event();
        let begin = event.begin().unwrap();

        assert_eq!(
            begin,
            chrono_tz::America::Toronto
                .with_ymd_and_hms(2023, 11, 20, 8, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_end_uses_last_time_and_last_timezone() {
        let mut event = make_test_event();
        event.end_date = "2022-01-01".to_string();
        event.list_times = vec!["12:00".to_string(), "13:00".to_string(), "14:00".to_string()];
        event.destination_timezone = vec![
            "America/New_York".to_string(),
            "America/Los_Angeles".to_string(),
        ];

        let end = event.end().unwrap();
        assert_eq!(
            end,
            chrono_tz::America::Los_Angeles
                .with_ymd_and_hms(2022, 1, 1, 14, 0, 0)
                .unwrap()
        );
        assert_eq!(end.hour(), 14);
    }

    #[test]
    fn test_end_prefers_arrival_time() {
        let mut event = make_test_event();
        event.arrival_time = Some("16:55".to_string());

        let end = event.end().unwrap();
        assert_eq!((end.hour(), end.minute()), (16, 55));
    }

    #[test]
    fn test_end_without_times() {
        let mut event = make_test_event();
        event.list_times.clear();

        let err = event.end().unwrap_err();
        assert!(matches!(err, CrewCalError::EmptySequence("list_times")));
    }

    #[test]
    fn test_legs() {
        let event = make_test_event();
        let legs = event.legs();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1].flight, "AC863");
        assert_eq!(legs[1].departure.code, "LHR");
        assert_eq!(legs[1].destination.timezone, "America/Toronto");
    }
}
