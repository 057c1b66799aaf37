//! Core types for crewcal.
//!
//! This crate turns the structured duty list extracted from an airline crew
//! schedule into iCalendar events:
//! - `Event` and `Schedule`, validated from extractor JSON
//! - timezone-aware start/end resolution in `time`
//! - calendar projection in `ics`
//! - the `Extractor` collaborator and its subprocess protocol

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod extractor;
pub mod hotel;
pub mod ics;
pub mod pdf;
pub mod pipeline;
pub mod protocol;
pub mod schedule;
pub mod time;

pub use config::CrewcalConfig;
pub use error::{CrewCalError, CrewCalResult};
pub use event::{Airport, Event, Leg};
pub use extractor::{CommandExtractor, Extractor};
pub use hotel::{Hotel, Hotels};
pub use pipeline::{Extraction, extract_schedule};
pub use schedule::{Schedule, ScheduleJson, WriteOutcome};
