//! Category option filters and the records built from them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter snippet configured for one category option
///
/// An empty `filter` is meaningful: the option contributes nothing and every
/// category option combo that contains it is left out of generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryOptionFilter {
    pub name: String,
    #[serde(default)]
    pub filter: String,
}

impl CategoryOptionFilter {
    pub fn new(name: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: filter.into(),
        }
    }

    /// Whether the option was explicitly mapped to "no filter"
    pub fn is_blank(&self) -> bool {
        self.filter.is_empty()
    }
}

/// Category option UID -> filter
pub type CategoryOptionFilterMap = BTreeMap<String, CategoryOptionFilter>;

/// Filter and name suffix for one category option combo of a single axis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CocFilter {
    pub coc_uid: String,
    pub filter: String,
    pub suffix: String,
}

/// One data set COC crossed with one data element COC
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CombinedFilter {
    /// Data element axis COC, exported as the category option combo
    pub coc_uid: String,
    /// Data set axis COC, exported as the attribute option combo
    pub aoc_uid: String,
    pub filter: String,
    pub suffix: String,
}
