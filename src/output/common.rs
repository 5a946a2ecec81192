//! Common utilities for output formatters

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{IbmError, Result};

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn to_json_string<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn to_yaml_string<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_yml::to_string(data).map_err(|e| IbmError::Json(format!("YAML encoding failed: {}", e)))
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    println!("{}", to_json_string(data)?);
    Ok(())
}

pub fn print_yaml<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    print!("{}", to_yaml_string(data)?);
    Ok(())
}

/// Print a single API payload unchanged; YAML when asked, JSON otherwise
pub fn output_raw(raw: &serde_json::Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print_yaml(raw),
        _ => print_json(raw),
    }
}
