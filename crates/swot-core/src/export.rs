//! Quiz collection export and import.
//!
//! Two formats: plain pretty-printed JSON, and an "encoded" variant that
//! wraps the same JSON in base64 behind a marker prefix. The encoded form
//! is reversible obfuscation for casual sharing only; it is NOT
//! encryption and provides no confidentiality guarantee whatsoever.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Quiz;

/// Marker prefixed to encoded exports so imports can auto-detect them
const ENCODED_MARKER: &str = "SWOT1:";

/// Export output format shared by all clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Encoded,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Encoded => "swot",
        }
    }
}

/// Render quizzes as pretty-printed JSON.
pub fn render_json_export(quizzes: &[Quiz]) -> Result<String> {
    Ok(serde_json::to_string_pretty(quizzes)?)
}

/// Render quizzes in the obfuscated sharing form (marker + base64 JSON).
pub fn render_encoded_export(quizzes: &[Quiz]) -> Result<String> {
    let json = serde_json::to_string(quizzes)?;
    Ok(format!("{ENCODED_MARKER}{}", STANDARD.encode(json)))
}

/// Render quizzes based on selected export format.
pub fn render_export(quizzes: &[Quiz], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => render_json_export(quizzes),
        ExportFormat::Encoded => render_encoded_export(quizzes),
    }
}

/// Parse exported text back into quiz records, auto-detecting the format.
///
/// Accepts either a quiz array or a single shared quiz object; the caller
/// feeds the result to reconciliation, which validates each record.
pub fn parse_import(text: &str) -> Result<Vec<Quiz>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("import text is empty".into()));
    }

    let json = if let Some(encoded) = trimmed.strip_prefix(ENCODED_MARKER) {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|error| Error::InvalidInput(format!("unreadable encoded export: {error}")))?;
        String::from_utf8(bytes)
            .map_err(|error| Error::InvalidInput(format!("unreadable encoded export: {error}")))?
    } else {
        trimmed.to_string()
    };

    if let Ok(quizzes) = serde_json::from_str::<Vec<Quiz>>(&json) {
        return Ok(quizzes);
    }
    let single: Quiz = serde_json::from_str(&json)?;
    Ok(vec![single])
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("swot-export-{timestamp_ms}.{}", format.extension())
}
