//! A crew member's flight schedule and its JSON persistence.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use icalendar::Calendar;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CrewCalError, CrewCalResult};
use crate::event::Event;
use crate::ics;

/// An ordered list of duties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    pub events: Vec<Event>,
}

/// Schedule JSON, either as text or already decoded.
#[derive(Debug, Clone)]
pub enum ScheduleJson<'a> {
    Text(Cow<'a, str>),
    Value(Value),
}

impl<'a> From<&'a str> for ScheduleJson<'a> {
    fn from(text: &'a str) -> Self {
        ScheduleJson::Text(Cow::Borrowed(text))
    }
}

impl From<String> for ScheduleJson<'_> {
    fn from(text: String) -> Self {
        ScheduleJson::Text(Cow::Owned(text))
    }
}

impl From<Value> for ScheduleJson<'_> {
    fn from(value: Value) -> Self {
        ScheduleJson::Value(value)
    }
}

/// Result of writing a calendar file.
#[must_use]
#[derive(Debug)]
pub enum WriteOutcome {
    Written { path: PathBuf, events: usize },
    Failed { path: PathBuf, error: std::io::Error },
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }

    /// Turn a failed write back into an error, returning the event count otherwise.
    pub fn into_result(self) -> CrewCalResult<usize> {
        match self {
            WriteOutcome::Written { events, .. } => Ok(events),
            WriteOutcome::Failed { error, .. } => Err(CrewCalError::Io(error)),
        }
    }
}

impl Schedule {
    pub fn new(events: Vec<Event>) -> Self {
        Schedule { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Load a schedule from a JSON file holding an array of events.
    pub fn from_json(path: impl AsRef<Path>) -> CrewCalResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Read schedule file");

        Self::from_json_str(&contents)
    }

    /// Load a schedule from JSON text or an already decoded JSON value.
    pub fn from_json_string<'a>(json: impl Into<ScheduleJson<'a>>) -> CrewCalResult<Self> {
        match json.into() {
            ScheduleJson::Text(text) => Self::from_json_str(&text),
            ScheduleJson::Value(value) => Self::from_json_value(value),
        }
    }

    pub fn from_json_str(text: &str) -> CrewCalResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Validate a decoded JSON document into a schedule.
    ///
    /// Accepts a bare array of events or an object with an `events` array.
    pub fn from_json_value(value: Value) -> CrewCalResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut object) => match object.remove("events") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(CrewCalError::InvalidDocument(
                        "object has no 'events' array".into(),
                    ));
                }
            },
            other => {
                return Err(CrewCalError::InvalidDocument(format!(
                    "expected an array of events, found {}",
                    json_kind(&other)
                )));
            }
        };

        let events = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Event::from_value(index, item))
            .collect::<CrewCalResult<Vec<_>>>()?;

        Ok(Schedule { events })
    }

    /// Pretty-printed JSON (2-space indent, non-ASCII kept as is).
    pub fn json_dumps(&self) -> CrewCalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> CrewCalResult<()> {
        fs::write(path, self.json_dumps()?)?;
        Ok(())
    }

    pub fn to_icalendar(&self) -> CrewCalResult<Calendar> {
        ics::generate_calendar(self)
    }

    pub fn to_ics_string(&self) -> CrewCalResult<String> {
        ics::generate_ics(self)
    }

    /// Write the schedule as an iCalendar file.
    ///
    /// Errors building the calendar are returned before the file is touched.
    /// A failed write is logged and reported as [`WriteOutcome::Failed`].
    pub fn to_icalendar_file(&self, path: impl AsRef<Path>) -> CrewCalResult<WriteOutcome> {
        let path = path.as_ref().to_path_buf();
        let events = ics::project_events(self)?;
        let count = events.len();
        let contents = ics::render(events);

        match fs::write(&path, contents) {
            Ok(()) => {
                info!(path = %path.display(), events = count, "Wrote calendar file");
                Ok(WriteOutcome::Written { path, events: count })
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Error writing calendar file");
                Ok(WriteOutcome::Failed { path, error })
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
