//! Validation functionality
//!
//! Provides validation logic for:
//! - Metadata UIDs and mapping row ids
//! - Mapping rows before generation

pub mod input;

pub use input::{
    MAX_ROW_ID_LENGTH, ValidationError, ValidationResult, validate_mapping_row, validate_row_id,
    validate_uid,
};
