//! Extractor protocol types.
//!
//! Defines the JSON protocol used between crewcal and extractor binaries
//! over stdin/stdout. Each call is one request line in, one response out.

use serde::{Deserialize, Serialize};

/// Commands that extractors must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Returns the duty list as an array of event objects
    ExtractSchedule,
    /// Returns `{"hotels": [...]}`
    ExtractHotels,
}

/// Request sent from crewcal to the extractor.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    pub document: String,
}

/// Response sent from the extractor to crewcal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}
