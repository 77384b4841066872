//! Source metadata read by the mapping engine
//!
//! These mirror the JSON shape returned by the metadata API (camelCase field
//! names). Only the fields the engine reads or writes are typed; program
//! indicators keep every other field in an untyped `extra` map so that a
//! generated copy carries them through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the implicit category option used by undisaggregated combos
pub const DEFAULT_CATEGORY_OPTION: &str = "default";

/// Reference to another metadata object by UID
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IdRef {
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Custom attribute value attached to a metadata object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeValue {
    pub value: String,
    pub attribute: IdRef,
}

impl AttributeValue {
    pub fn new(attribute_uid: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            attribute: IdRef::new(attribute_uid),
        }
    }
}

/// A single option of a category (e.g. "Male" of "Sex")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

impl CategoryOption {
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CATEGORY_OPTION
    }
}

/// A category of a category combo, listing the options it owns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_options: Vec<IdRef>,
}

/// One disaggregation of a category combo: one option from each category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptionCombo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_options: Vec<CategoryOption>,
}

impl CategoryOptionCombo {
    /// Category options in canonical order
    ///
    /// Options are ordered by the position of their owning category in
    /// `categories`, then by UID. Options whose category is unknown sort after
    /// all known ones. The result never depends on the order the options were
    /// listed in, which keeps generated filters and name suffixes stable.
    pub fn canonical_options(&self, categories: &[Category]) -> Vec<&CategoryOption> {
        let category_position = |option: &CategoryOption| {
            categories
                .iter()
                .position(|category| category.category_options.iter().any(|o| o.id == option.id))
                .unwrap_or(usize::MAX)
        };

        let mut options: Vec<&CategoryOption> = self.category_options.iter().collect();
        options.sort_by(|a, b| {
            category_position(a)
                .cmp(&category_position(b))
                .then_with(|| a.id.cmp(&b.id))
        });
        options
    }
}

/// Category combo assigned to a data set or data element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCombo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub category_option_combos: Vec<CategoryOptionCombo>,
}

/// Data set; its category combo supplies the attribute option combos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_combo: Option<CategoryCombo>,
}

/// Data element; its category combo supplies the category option combos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataElement {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_combo: Option<CategoryCombo>,
}

/// Metadata that can be looked up by UID
pub trait HasUid {
    fn uid(&self) -> &str;
}

/// Metadata that can be disaggregated through a category combo
pub trait Disaggregated: HasUid {
    /// Human readable kind used in error messages ("data set", "data element")
    const KIND: &'static str;

    fn name(&self) -> &str;
    fn category_combo(&self) -> Option<&CategoryCombo>;
}

impl HasUid for DataSet {
    fn uid(&self) -> &str {
        &self.id
    }
}

impl HasUid for DataElement {
    fn uid(&self) -> &str {
        &self.id
    }
}

impl HasUid for ProgramIndicator {
    fn uid(&self) -> &str {
        &self.id
    }
}

impl Disaggregated for DataSet {
    const KIND: &'static str = "data set";

    fn name(&self) -> &str {
        &self.name
    }

    fn category_combo(&self) -> Option<&CategoryCombo> {
        self.category_combo.as_ref()
    }
}

impl Disaggregated for DataElement {
    const KIND: &'static str = "data element";

    fn name(&self) -> &str {
        &self.name
    }

    fn category_combo(&self) -> Option<&CategoryCombo> {
        self.category_combo.as_ref()
    }
}

/// Analytics period boundary of a program indicator
///
/// The `id` is owned by the target system and is dropped when a program
/// indicator is used as a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalyticsPeriodBoundary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Program indicator, either a mapping source or a generated copy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgramIndicator {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default)]
    pub analytics_period_boundaries: Vec<AnalyticsPeriodBoundary>,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_export_category_option_combo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_export_attribute_option_combo: Option<String>,
    /// Any other fields (program, analyticsType, decimals, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgramIndicator {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Value of the given custom attribute, if set
    pub fn attribute_value(&self, attribute_uid: &str) -> Option<&str> {
        self.attribute_values
            .iter()
            .find(|av| av.attribute.id == attribute_uid)
            .map(|av| av.value.as_str())
    }
}

/// Indicator type (factor) referenced by generated indicators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorType {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<i64>,
}
