/*
 * data.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loading template data from disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use stencil_template::Data;

/// Data file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => anyhow::bail!(
                "Unsupported data file {:?}: expected a .json, .yaml or .yml extension",
                path
            ),
        }
    }
}

/// Read and parse a data file.
pub fn load(path: &Path) -> Result<Data> {
    let format = Format::from_path(path)?;
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read data: {:?}", path))?;
    tracing::debug!(path = %path.display(), ?format, "Loading data");
    parse(&content, format).with_context(|| format!("Failed to parse data: {:?}", path))
}

fn parse(content: &str, format: Format) -> Result<Data> {
    let data = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(data)
}
