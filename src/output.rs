use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{error::Result, generator::GeneratedFile, models::Provenance};

/// `sample-YYYYMMDD-HHMMSS` in local time.
pub fn default_name() -> String {
    format!("sample-{}", Local::now().format("%Y%m%d-%H%M%S"))
}

pub fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Writes `file` as `<dir>/<name>.<extension>` and returns the path.
pub fn write_generated(dir: &Path, name: &str, file: &GeneratedFile) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", name, file.extension));
    save_bytes(&path, &file.bytes)?;
    log::info!("💾 Image saved to: {}", path.display());
    Ok(path)
}

/// Last-resort path: synthesizes and writes the fallback SVG without touching
/// any provider.
pub fn write_fallback(dir: &Path, name: &str, prompt: &str, raw_size: &str) -> Result<PathBuf> {
    let file = GeneratedFile::fallback(prompt, raw_size, Provenance::Fallback);
    write_generated(dir, name, &file)
}

/// The single JSON line the standalone generator prints when it finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusLine {
    pub fn ok(provenance: &Provenance, path: &Path) -> Self {
        Self {
            status: "ok",
            provider: Some(provenance.to_string()),
            path: Some(path.display().to_string()),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            provider: None,
            path: None,
            message: Some(message.into()),
        }
    }

    pub fn to_json(&self) -> String {
        // Every field is a plain string; serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"status\":\"{}\"}}", self.status))
    }
}
