//! Mapping generation
//!
//! Turns one mapping row (data set + data element + program indicator) into
//! the metadata changes that implement it:
//! - [`filters`] builds per-axis category option combo filters and crosses them
//! - [`program_indicators`] derives one program indicator per combination
//! - [`indicators`] wraps each program indicator in an indicator and group
//! - [`generator`] runs the whole pass for a row and assembles the result
//! - [`removal`] plans the removal of everything generated for a row

pub mod filters;
pub mod generator;
pub mod indicators;
pub mod program_indicators;
pub mod removal;

pub use filters::{base_filter, coc_filters, combine_filters, find_by_uid};
pub use generator::{
    CreateUpdateMetadata, DeleteMetadata, MappingGenerator, MappingResult, RowOutcome, RowStatus,
};
pub use indicators::{IndicatorChanges, IndicatorSynthesizer, indicator_group};
pub use program_indicators::{
    RowContext, combined_uid, stale_program_indicators, synthesize_program_indicators,
};
pub use removal::{RemovalPlan, plan_row_removal};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of metadata looked up by UID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataKind {
    DataSet,
    DataElement,
    ProgramIndicator,
    MappingRow,
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataKind::DataSet => write!(f, "data set"),
            MetadataKind::DataElement => write!(f, "data element"),
            MetadataKind::ProgramIndicator => write!(f, "program indicator"),
            MetadataKind::MappingRow => write!(f, "mapping row"),
        }
    }
}

/// Error during mapping generation
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize, PartialEq)]
pub enum MappingError {
    /// A referenced UID is missing from the supplied metadata snapshot
    #[error("Could not find {kind} with UID {uid} in metadata")]
    NotFound { kind: MetadataKind, uid: String },

    /// Metadata or configuration the user has to correct before retrying
    #[error("{0}")]
    MappingGeneration(String),
}

impl MappingError {
    pub fn not_found(kind: MetadataKind, uid: impl Into<String>) -> Self {
        MappingError::NotFound {
            kind,
            uid: uid.into(),
        }
    }

    /// Whether the error should be shown to the user as a validation message
    /// rather than treated as a failure of the call
    pub fn is_user_facing(&self) -> bool {
        matches!(self, MappingError::MappingGeneration(_))
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
