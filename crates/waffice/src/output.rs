//! Output modes and destinations.
//!
//! [`OutputMode`] selects between a plain or styled table and structured
//! serialization of the computed page. [`OutputDestination`] decides where
//! the rendered text ends up.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

/// Controls how a page is rendered.
///
/// This is the user-facing enum for the `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// TTY gets `term`, anything else gets `text`
    #[default]
    Auto,
    /// Table with terminal styling
    Term,
    /// Plain table
    Text,
    /// The page as JSON
    Json,
    /// The page as YAML
    Yaml,
    /// The page records as CSV
    Csv,
}

impl OutputMode {
    /// Returns true if this mode serializes data instead of drawing a table.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }

    /// Resolves `Auto` to `Term` or `Text` based on whether stdout is a
    /// terminal. Other modes are returned unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if console::user_attended() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// Returns true if table output should carry ANSI styling.
    pub fn is_styled(&self) -> bool {
        matches!(self.resolve_auto(), OutputMode::Term)
    }
}

/// Errors that can occur during structured serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("not a structured output mode")]
    NotStructured,
}

/// Serializes data to the given structured format.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => serialize_csv(data),
        _ => Err(SerializeError::NotStructured),
    }
}

/// Serializes a list of records as CSV, one row per record.
///
/// Records go through JSON first; headers come from the first record and
/// nested values (such as tag lists) are written as compact JSON.
pub fn serialize_csv<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    let json_value = serde_json::to_value(data)?;
    let mut wtr = csv::Writer::from_writer(vec![]);

    if let serde_json::Value::Array(rows) = &json_value {
        if let Some(serde_json::Value::Object(first)) = rows.first() {
            let headers: Vec<&str> = first.keys().map(String::as_str).collect();
            wtr.write_record(&headers)
                .map_err(|e| SerializeError::Csv(e.to_string()))?;

            for row in rows {
                if let serde_json::Value::Object(obj) = row {
                    let cells: Vec<String> = headers
                        .iter()
                        .map(|h| obj.get(*h).map(cell_text).unwrap_or_default())
                        .collect();
                    wtr.write_record(&cells)
                        .map_err(|e| SerializeError::Csv(e.to_string()))?;
                }
            }
        }
    } else {
        return Err(SerializeError::Csv("expected a list of records".into()));
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}

fn cell_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputDestination {
    /// Write to standard output
    #[default]
    Stdout,
    /// Write to a file, replacing its contents
    File(PathBuf),
}

impl OutputDestination {
    /// Builds a destination from the optional `--out` path.
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(OutputDestination::Stdout, OutputDestination::File)
    }

    /// Writes text content to this destination.
    pub fn write_text(&self, content: &str) -> std::io::Result<()> {
        match self {
            OutputDestination::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", content)
            }
            OutputDestination::File(path) => {
                validate_path(path)?;
                std::fs::write(path, content)
            }
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}
