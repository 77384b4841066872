//! PI Mapping SDK - Program indicator disaggregation mapping engine
//!
//! Provides unified interfaces for:
//! - Mapping generation (one program indicator per category option combo pair)
//! - Indicator and indicator group synthesis
//! - Removal planning for deleted mapping rows
//! - Mutation plans for the metadata import API
//! - Configuration and input validation

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod mapping;
pub mod models;
pub mod uid;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, MappingConfig};
pub use export::{ExportError, ExportResult, ImportStrategy, MutationPlan, PlanExporter};
pub use mapping::{
    MappingError, MappingGenerator, MappingResult, MetadataKind, RemovalPlan, RowOutcome,
    RowStatus, plan_row_removal,
};
pub use uid::{RandomUidGenerator, SequenceUidGenerator, UidGenerator};
pub use validation::{ValidationError, ValidationResult};

// Re-export models
pub use models::{
    BaseMetadata, CategoryOptionFilter, CategoryOptionFilterMap, GeneratedMetadata, LineageKey,
    MappingRow, MappingStore, ProgramIndicator,
};
