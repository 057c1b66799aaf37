//! Document text → extractor → validated schedule.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::CrewCalResult;
use crate::extractor::Extractor;
use crate::schedule::Schedule;

/// Extractor output together with the schedule validated from it.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The JSON exactly as the extractor returned it
    pub raw: Value,
    pub schedule: Schedule,
}

impl Extraction {
    /// Pretty-printed extractor output, suitable for caching to a file.
    pub fn raw_json(&self) -> CrewCalResult<String> {
        Ok(serde_json::to_string_pretty(&self.raw)?)
    }

    pub fn save_raw_json(&self, path: impl AsRef<Path>) -> CrewCalResult<()> {
        std::fs::write(path, self.raw_json()?)?;
        Ok(())
    }
}

/// Run the extractor over `document_text` and validate its answer.
pub async fn extract_schedule<E: Extractor>(
    extractor: &E,
    document_text: &str,
) -> CrewCalResult<Extraction> {
    let raw = extractor.extract(document_text).await?;
    let schedule = Schedule::from_json_value(raw.clone())?;

    info!(duties = schedule.len(), "Extracted schedule");
    Ok(Extraction { raw, schedule })
}
