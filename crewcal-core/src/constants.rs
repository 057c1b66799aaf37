/// Creator identifier written as the PRODID of every generated calendar.
pub const CALENDAR_CREATOR: &str = "-//crewcal//crew schedule//EN";

/// Suffix appended to generated event UIDs.
pub const UID_DOMAIN: &str = "crewcal";

/// Fixed format of the combined date and time fields (`YYYY-MM-DD HH:mm`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Human-readable form of [`DATETIME_FORMAT`] used in error messages.
pub const DATETIME_FORMAT_HINT: &str = "YYYY-MM-DD HH:mm";

pub const DEFAULT_EXTRACTOR: &str = "openai";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
