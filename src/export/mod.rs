//! Export functionality
//!
//! Turns mapping results into metadata import requests for the collaborator
//! that talks to the metadata API:
//! - ordered mutation plans (delete first, then create-or-replace)
//! - JSON and YAML renderings of those plans

pub mod payload;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub use payload::{ImportStrategy, MetadataImport, MetadataPayload, MutationPlan, PlanExporter};
