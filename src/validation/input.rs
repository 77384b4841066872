//! Input validation for identifiers handed to the mapping engine.
//!
//! Metadata UIDs and mapping row ids end up inside generated names, short
//! names and lineage keys, so malformed values are rejected before any
//! metadata is generated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MappingRow, ROW_ID_PREFIX};

static UID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]{10}$").expect("valid UID regex"));

/// Maximum length of a mapping row id
pub const MAX_ROW_ID_LENGTH: usize = 128;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a metadata UID.
///
/// # Examples
///
/// ```
/// use pi_mapping_sdk::validation::validate_uid;
///
/// assert!(validate_uid("FTRrcoaog83").is_ok());
/// assert!(validate_uid("1TRrcoaog83").is_err());
/// assert!(validate_uid("short").is_err());
/// ```
pub fn validate_uid(uid: &str) -> ValidationResult<()> {
    if uid.is_empty() {
        return Err(ValidationError::Empty("UID"));
    }
    if !UID_PATTERN.is_match(uid) {
        return Err(ValidationError::InvalidFormat(
            "UID",
            format!(
                "'{}' must be 11 letters or digits starting with a letter",
                uid
            ),
        ));
    }
    Ok(())
}

/// Validate a mapping row id.
///
/// Row ids must not contain whitespace: generated indicator group names end
/// the row id at the first space.
pub fn validate_row_id(row_id: &str) -> ValidationResult<()> {
    if row_id.is_empty() {
        return Err(ValidationError::Empty("row id"));
    }
    if row_id.len() > MAX_ROW_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "row id",
            max: MAX_ROW_ID_LENGTH,
            actual: row_id.len(),
        });
    }
    if let Some(c) = row_id.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidFormat(
            "row id",
            format!("invalid character: {:?}", c),
        ));
    }
    if !row_id.starts_with(ROW_ID_PREFIX) {
        tracing::debug!("Row id {} does not use the {} prefix", row_id, ROW_ID_PREFIX);
    }
    Ok(())
}

/// Validate every identifier of a mapping row.
pub fn validate_mapping_row(row: &MappingRow) -> ValidationResult<()> {
    validate_row_id(&row.row_id)?;
    validate_uid(&row.ds_uid)?;
    validate_uid(&row.de_uid)?;
    validate_uid(&row.pi_uid)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_row_id_with_spaces() {
        assert!(matches!(
            validate_row_id("rowId-a b"),
            Err(ValidationError::InvalidFormat("row id", _))
        ));
    }

    #[test]
    fn rejects_overlong_row_id() {
        let long = format!("{}{}", ROW_ID_PREFIX, "a".repeat(MAX_ROW_ID_LENGTH));
        assert!(matches!(
            validate_row_id(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn validates_complete_row() {
        let row = MappingRow::new("rowId-Ab3dE5gH9jK", "dsUid000001", "deUid000001", "piUid000001");
        assert!(validate_mapping_row(&row).is_ok());

        let incomplete = MappingRow::new("rowId-Ab3dE5gH9jK", "dsUid000001", "", "piUid000001");
        assert_eq!(
            validate_mapping_row(&incomplete),
            Err(ValidationError::Empty("UID"))
        );
    }
}
