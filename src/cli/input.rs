//! Reading and writing the documents the CLI works on
//!
//! Mapping stores and metadata snapshots are JSON unless the file name ends
//! in `.yaml` or `.yml`.

use crate::cli::error::CliError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Text format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

/// Parse document content in the given format
pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<T, CliError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| CliError::ParseError(path.to_path_buf(), e.to_string())),
        DocumentFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| CliError::ParseError(path.to_path_buf(), e.to_string())),
    }
}

/// Read and parse a document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
    parse_document(&content, DocumentFormat::from_path(path), path)
}

/// Read a document, or its default when the file does not exist yet
pub fn read_document_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, CliError> {
    if path.exists() {
        read_document(path)
    } else {
        Ok(T::default())
    }
}

/// Serialize a document in the format its file name asks for and write it
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let content = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?,
    };
    std::fs::write(path, content)
        .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))
}

/// Write command output to a file, or stdout when no file is given
pub fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, content)
            .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
