//! Text extraction from uploaded knowledge files
//!
//! Supported formats: TXT, CSV, JSON, XLSX/XLS. The format is sniffed from
//! the file extension; parsing is delegated to the `csv`, `serde_json` and
//! `calamine` crates. Tabular data is flattened one record per line with
//! fields joined by ", ".

use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};

/// Extract plain text from an uploaded file.
pub fn extract_text(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "txt" => extract_txt(path)?,
        "csv" => extract_csv(path)?,
        "json" => extract_json(path)?,
        "xlsx" | "xls" | "xlsm" | "xlsb" => extract_excel(path)?,
        other => {
            return Err(Error::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            }))
        }
    };

    info!(
        file = %path.display(),
        bytes = text.len(),
        "extracted text from upload"
    );
    Ok(text)
}

fn extract_txt(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

fn extract_csv(path: &Path) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<&str> = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if !fields.is_empty() {
            lines.push(fields.join(", "));
        }
    }

    Ok(lines.join("\n"))
}

fn extract_json(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| Error::ExtractionError(format!("invalid JSON: {}", e)))?;

    let mut lines = Vec::new();
    flatten_json(&value, &mut lines);
    Ok(lines.join("\n"))
}

/// Flatten a JSON value tree: objects as `key: value` lines, arrays
/// element-wise, scalars verbatim.
fn flatten_json(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) | Value::Array(_) => flatten_json(val, out),
                    scalar => out.push(format!("{}: {}", key, scalar_text(scalar))),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_json(item, out);
            }
        }
        scalar => {
            let text = scalar_text(scalar);
            if !text.is_empty() {
                out.push(text);
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn extract_excel(path: &Path) -> Result<String> {
    let mut workbook = open_workbook_auto(path)?;

    let mut lines = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| Error::ExtractionError(format!("sheet {}: {}", name, e)))?;

        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .filter(|cell| !matches!(cell, Data::Empty))
                .map(|cell| cell.to_string())
                .filter(|text| !text.trim().is_empty())
                .collect();
            if !cells.is_empty() {
                lines.push(cells.join(", "));
            }
        }
    }

    Ok(lines.join("\n"))
}
