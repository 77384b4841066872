//! Metadata snapshots and the generated indicator types

use super::metadata::{AttributeValue, DataElement, DataSet, IdRef, IndicatorType, ProgramIndicator};
use serde::{Deserialize, Serialize};

/// Prefix of the indicator group generated for a mapping row
pub const INDICATOR_GROUP_PREFIX: &str = "indMappingGroup-";

/// Indicator wrapping a generated program indicator (`I{uid}` / 1)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Indicator {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_type: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_export_category_option_combo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_export_attribute_option_combo: Option<String>,
    pub attribute_values: Vec<AttributeValue>,
}

/// Indicator group holding every indicator generated for one mapping row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct IndicatorGroup {
    pub id: String,
    pub name: String,
    pub indicators: Vec<IdRef>,
}

impl IndicatorGroup {
    /// Whether this is the group generated for `row_id`
    ///
    /// Generated names look like `indMappingGroup-{rowId} (...)  (generated)`.
    /// The whole `indMappingGroup-{rowId} ` prefix is matched, so row ids that
    /// contain spaces or are prefixes of other row ids are told apart.
    pub fn belongs_to_row(&self, row_id: &str) -> bool {
        if row_id.is_empty() {
            return false;
        }
        self.name
            .strip_prefix(INDICATOR_GROUP_PREFIX)
            .and_then(|rest| rest.strip_prefix(row_id))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
    }
}

/// Program indicator group, only ever removed together with its row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramIndicatorGroup {
    pub id: String,
    pub name: String,
    pub program_indicators: Vec<IdRef>,
}

/// Read-only snapshot of the metadata a mapping row points at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseMetadata {
    pub data_sets: Vec<DataSet>,
    pub data_elements: Vec<DataElement>,
    pub program_indicators: Vec<ProgramIndicator>,
    pub indicator_types: Vec<IndicatorType>,
}

/// Metadata produced by earlier generations of a mapping row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedMetadata {
    pub program_indicators: Vec<ProgramIndicator>,
    pub indicators: Vec<Indicator>,
    pub indicator_groups: Vec<IndicatorGroup>,
    pub program_indicator_groups: Vec<ProgramIndicatorGroup>,
}
