//! Hotel contacts extracted alongside a schedule.
//!
//! The vCard text comes straight from the extractor and is written out
//! untouched; only the file name is sanitized.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CrewCalError, CrewCalResult};

/// Contact details of a layover hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    /// Proposed file name for the vCard, usually with extension
    pub vcf_file_name: String,
    /// Full contact in vCard format
    pub hotel_contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotels {
    pub hotels: Vec<Hotel>,
}

impl Hotel {
    /// File name to write the vCard to, without any directory part.
    pub fn file_name(&self) -> CrewCalResult<PathBuf> {
        let name = Path::new(self.vcf_file_name.trim())
            .file_name()
            .ok_or_else(|| {
                CrewCalError::Extractor(format!(
                    "Invalid vCard file name '{}'",
                    self.vcf_file_name
                ))
            })?;

        let mut name = PathBuf::from(name);
        if name.extension().is_none() {
            name.set_extension("vcf");
        }
        Ok(name)
    }

    /// Write the contact to `dir`, returning the file path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> CrewCalResult<PathBuf> {
        let path = dir.as_ref().join(self.file_name()?);
        fs::write(&path, &self.hotel_contact)?;
        debug!(path = %path.display(), "Wrote hotel contact");
        Ok(path)
    }
}
