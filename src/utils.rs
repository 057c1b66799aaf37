use std::path::{Path, PathBuf};

use anyhow::Result;

/// Add `extension` when the path has none.
pub fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

/// Refuse to replace an existing file unless asked to.
pub fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if path.is_file() && !overwrite {
        anyhow::bail!(
            "File '{}' already exists. Consider using the '--overwrite' option.",
            path.display()
        );
    }
    Ok(())
}

/// Find an input file, trying it with `extension` if the path as given is missing.
pub fn resolve_input(path: &Path, extension: &str) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let fallback = path.with_extension(extension);
    if fallback.is_file() {
        tracing::info!(
            "File '{}' not found. Using '{}' instead.",
            path.display(),
            fallback.display()
        );
        return Ok(fallback);
    }

    anyhow::bail!("File '{}' not found.", path.display())
}
