//! Getting text out of a schedule document.
//!
//! PDF layout parsing is left to an external command (`pdftotext` by
//! default). Anything that is not a PDF is read as plain text.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::CrewcalConfig;
use crate::error::{CrewCalError, CrewCalResult};

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Text of the schedule document at `path`.
pub async fn document_text(path: &Path, config: &CrewcalConfig) -> CrewCalResult<String> {
    if !is_pdf(path) {
        return Ok(tokio::fs::read_to_string(path).await?);
    }

    let (program, args) = config
        .pdf_to_text
        .split_first()
        .ok_or_else(|| CrewCalError::Config("pdf_to_text command is empty".into()))?;

    debug!(program = %program, path = %path.display(), "Converting PDF to text");

    let run = Command::new(program)
        .args(args)
        .arg(path)
        .arg("-")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = timeout(config.timeout(), run)
        .await
        .map_err(|_| CrewCalError::PdfToText(format!("{program} timed out")))?
        .map_err(|e| CrewCalError::PdfToText(format!("Failed to run {program}: {e}")))?;

    if !output.status.success() {
        return Err(CrewCalError::PdfToText(format!(
            "{program} exited with status: {}",
            output.status.code().unwrap_or(-1)
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
