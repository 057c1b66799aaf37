//! crewcal configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXTRACTOR, DEFAULT_TIMEOUT_SECS};
use crate::error::{CrewCalError, CrewCalResult};

fn default_extractor() -> String {
    DEFAULT_EXTRACTOR.to_string()
}

fn default_pdf_to_text() -> Vec<String> {
    vec!["pdftotext".to_string(), "-layout".to_string()]
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/crewcal/config.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewcalConfig {
    /// Extractor name (`crewcal-extractor-<name>` on PATH) or path
    #[serde(default = "default_extractor")]
    pub extractor: String,

    /// PDF-to-text command; the source path and `-` are appended
    #[serde(default = "default_pdf_to_text")]
    pub pdf_to_text: Vec<String>,

    /// Timeout for each external command
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where hotel vCards go when `--hotels` is given without a directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_dir: Option<PathBuf>,
}

impl Default for CrewcalConfig {
    fn default() -> Self {
        CrewcalConfig {
            extractor: default_extractor(),
            pdf_to_text: default_pdf_to_text(),
            timeout_secs: default_timeout_secs(),
            hotel_dir: None,
        }
    }
}

impl CrewcalConfig {
    pub fn config_path() -> CrewCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CrewCalError::Config("Could not determine config directory".into()))?
            .join("crewcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/crewcal/config.toml, falling back to defaults.
    pub fn load() -> CrewCalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CrewCalResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CrewCalError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| CrewCalError::Config(format!("Could not parse {}: {e}", path.display())))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CrewCalResult<()> {
        let contents = format!(
            "\
# crewcal configuration

# Extractor used by `crewcal extract` (crewcal-extractor-<name> on PATH):
# extractor = \"{DEFAULT_EXTRACTOR}\"

# Command turning a PDF into text on stdout:
# pdf_to_text = [\"pdftotext\", \"-layout\"]

# Seconds to wait for external commands:
# timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Default directory for hotel vCards:
# hotel_dir = \"~/Documents/hotels\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CrewCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CrewCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
