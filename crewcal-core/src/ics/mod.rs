//! iCalendar generation.
//!
//! Projects a [`Schedule`](crate::Schedule) into RFC 5545 `VCALENDAR` text.

mod generate;

pub use generate::{generate_calendar, generate_ics, project_events, render};
