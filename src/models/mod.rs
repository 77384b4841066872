//! Models module for the SDK
//!
//! Defines the metadata read by the mapping engine, the records it builds
//! while combining filters, and the metadata it generates.

pub mod filters;
pub mod generated;
pub mod lineage;
pub mod mapping_store;
pub mod metadata;

pub use filters::{CategoryOptionFilter, CategoryOptionFilterMap, CocFilter, CombinedFilter};
pub use generated::{
    BaseMetadata, GeneratedMetadata, INDICATOR_GROUP_PREFIX, Indicator, IndicatorGroup,
    ProgramIndicatorGroup,
};
pub use lineage::{LineageKey, mentions_row};
pub use mapping_store::{MappingRow, MappingStore, ROW_ID_PREFIX};
pub use metadata::{
    AnalyticsPeriodBoundary, AttributeValue, Category, CategoryCombo, CategoryOption,
    CategoryOptionCombo, DEFAULT_CATEGORY_OPTION, DataElement, DataSet, Disaggregated, HasUid,
    IdRef, IndicatorType, ProgramIndicator,
};
