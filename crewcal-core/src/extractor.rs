//! Schedule extraction collaborators.
//!
//! Turning a crew schedule document into structured JSON is done by an
//! external service (an LLM). crewcal only sees it through the [`Extractor`]
//! trait. [`CommandExtractor`] talks to an extractor binary
//! (e.g. `crewcal-extractor-openai`) using JSON over stdin/stdout, so the
//! prompt and API plumbing live outside this crate.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::CrewcalConfig;
use crate::error::{CrewCalError, CrewCalResult};
use crate::hotel::{Hotel, Hotels};
use crate::protocol::{Command as ExtractorCommand, Request, Response};

/// Something that can read a schedule document.
pub trait Extractor {
    /// Extract the duties as an array of event objects.
    fn extract(&self, document_text: &str) -> impl Future<Output = CrewCalResult<Value>> + Send;

    /// Extract layover hotel contacts.
    fn extract_hotels(
        &self,
        document_text: &str,
    ) -> impl Future<Output = CrewCalResult<Vec<Hotel>>> + Send;
}

/// Extractor backed by an external binary.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    name: String,
    timeout: Duration,
}

impl CommandExtractor {
    /// `name` is either a path to an executable or a short name resolved to
    /// `crewcal-extractor-<name>` on PATH.
    pub fn new(name: impl Into<String>, timeout: Duration) -> Self {
        CommandExtractor {
            name: name.into(),
            timeout,
        }
    }

    pub fn from_config(config: &CrewcalConfig) -> Self {
        Self::new(&config.extractor, config.timeout())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> CrewCalResult<PathBuf> {
        let path = Path::new(&self.name);
        if path.components().count() > 1 {
            return Ok(path.to_path_buf());
        }

        let binary_name = format!("crewcal-extractor-{}", self.name);
        which::which(&binary_name).map_err(|_| CrewCalError::ExtractorNotInstalled(binary_name))
    }

    /// Call an extractor command, giving up after the configured timeout.
    pub async fn call<R: DeserializeOwned>(
        &self,
        command: ExtractorCommand,
        document: &str,
    ) -> CrewCalResult<R> {
        timeout(self.timeout, self.call_unbounded(command, document))
            .await
            .map_err(|_| CrewCalError::ExtractorTimeout(self.timeout.as_secs()))?
    }

    async fn call_unbounded<R: DeserializeOwned>(
        &self,
        command: ExtractorCommand,
        document: &str,
    ) -> CrewCalResult<R> {
        let request = Request {
            command,
            document: document.to_string(),
        };
        let request_json = serde_json::to_string(&request)?;

        let binary_path = self.binary_path()?;
        debug!(extractor = %binary_path.display(), ?command, "Calling extractor");

        let mut child = Command::new(&binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CrewCalError::Extractor(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CrewCalError::Extractor("Extractor stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(CrewCalError::Extractor(format!(
                "Extractor exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(CrewCalError::Extractor(
                "Extractor returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| CrewCalError::Extractor(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(CrewCalError::Extractor(error)),
        }
    }
}

impl Extractor for CommandExtractor {
    async fn extract(&self, document_text: &str) -> CrewCalResult<Value> {
        self.call(ExtractorCommand::ExtractSchedule, document_text).await
    }

    async fn extract_hotels(&self, document_text: &str) -> CrewCalResult<Vec<Hotel>> {
        let hotels: Hotels = self
            .call(ExtractorCommand::ExtractHotels, document_text)
            .await?;
        Ok(hotels.hotels)
    }
}
