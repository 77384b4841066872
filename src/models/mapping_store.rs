//! Persisted mapping configuration
//!
//! The mapping rows and the category option filters are kept together in one
//! document (stored by an external collaborator, e.g. a key/value data store):
//!
//! ```json
//! {
//!   "generateIndicators": true,
//!   "dePiMaps": { "rowId-Ab3dE5gH9jK": { "rowId": "...", "dsUid": "...", ... } },
//!   "coMaps": { "coUid": { "name": "Male", "filter": "#{x.y} == 'M'" } }
//! }
//! ```

use super::filters::CategoryOptionFilterMap;
use crate::uid::UidGenerator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of generated mapping row ids
pub const ROW_ID_PREFIX: &str = "rowId-";

/// One data element -> program indicator mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MappingRow {
    pub row_id: String,
    pub ds_uid: String,
    #[serde(default)]
    pub ds_name: String,
    pub de_uid: String,
    #[serde(default)]
    pub de_name: String,
    pub pi_uid: String,
    #[serde(default)]
    pub pi_name: String,
    /// Row specific filters, taking precedence over the shared `coMaps`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co_filters: Option<CategoryOptionFilterMap>,
}

impl MappingRow {
    pub fn new(
        row_id: impl Into<String>,
        ds_uid: impl Into<String>,
        de_uid: impl Into<String>,
        pi_uid: impl Into<String>,
    ) -> Self {
        Self {
            row_id: row_id.into(),
            ds_uid: ds_uid.into(),
            de_uid: de_uid.into(),
            pi_uid: pi_uid.into(),
            ..Default::default()
        }
    }

    /// Mint an id for a new row (`rowId-{uid}`)
    pub fn new_id(uids: &mut impl UidGenerator) -> String {
        format!("{}{}", ROW_ID_PREFIX, uids.next_uid())
    }

    /// Whether the data set, data element and program indicator are all chosen
    pub fn is_complete(&self) -> bool {
        !self.ds_uid.is_empty() && !self.de_uid.is_empty() && !self.pi_uid.is_empty()
    }
}

/// The whole mapping document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MappingStore {
    #[serde(default)]
    pub generate_indicators: bool,
    #[serde(default)]
    pub de_pi_maps: BTreeMap<String, MappingRow>,
    #[serde(default)]
    pub co_maps: CategoryOptionFilterMap,
}

impl MappingStore {
    pub fn row(&self, row_id: &str) -> Option<&MappingRow> {
        self.de_pi_maps.get(row_id)
    }

    /// Insert or replace a row and merge the filters edited alongside it
    pub fn upsert_row(&mut self, row: MappingRow, co_mappings: CategoryOptionFilterMap) {
        self.co_maps.extend(co_mappings);
        self.de_pi_maps.insert(row.row_id.clone(), row);
    }

    /// Remove a row, returning it when it existed
    pub fn remove_row(&mut self, row_id: &str) -> Option<MappingRow> {
        self.de_pi_maps.remove(row_id)
    }

    /// Shared filters overlaid with the row's own filters
    pub fn effective_filter_map(&self, row: &MappingRow) -> CategoryOptionFilterMap {
        let mut filters = self.co_maps.clone();
        if let Some(row_filters) = &row.co_filters {
            filters.extend(row_filters.clone());
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryOptionFilter;
    use crate::uid::SequenceUidGenerator;

    #[test]
    fn row_filters_take_precedence() {
        let mut store = MappingStore::default();
        store.co_maps.insert(
            "coMale".to_string(),
            CategoryOptionFilter::new("Male", "#{sex} == 'M'"),
        );
        store.co_maps.insert(
            "coFemale".to_string(),
            CategoryOptionFilter::new("Female", "#{sex} == 'F'"),
        );

        let mut row = MappingRow::new("rowId-1", "ds", "de", "pi");
        let mut overrides = CategoryOptionFilterMap::new();
        overrides.insert("coMale".to_string(), CategoryOptionFilter::new("Male", ""));
        row.co_filters = Some(overrides);

        let filters = store.effective_filter_map(&row);
        assert!(filters["coMale"].is_blank());
        assert_eq!(filters["coFemale"].filter, "#{sex} == 'F'");
        assert_eq!(store.co_maps["coMale"].filter, "#{sex} == 'M'");
    }

    #[test]
    fn new_row_ids_are_prefixed() {
        let mut uids = SequenceUidGenerator::default();
        let id = MappingRow::new_id(&mut uids);
        assert!(id.starts_with(ROW_ID_PREFIX));
        assert_eq!(id.len(), ROW_ID_PREFIX.len() + 11);
    }

    #[test]
    fn store_round_trips_camel_case_document() {
        let json = serde_json::json!({
            "generateIndicators": true,
            "dePiMaps": {
                "rowId-1": {
                    "rowId": "rowId-1",
                    "dsUid": "dsUid000001",
                    "dsName": "ANC",
                    "deUid": "deUid000001",
                    "deName": "ANC 1st visit",
                    "piUid": "piUid000001",
                    "piName": "ANC 1st visit (events)"
                }
            },
            "coMaps": {"coMale": {"name": "Male", "filter": "#{sex} == 'M'"}}
        });
        let mut store: MappingStore = serde_json::from_value(json).unwrap();
        assert!(store.generate_indicators);
        assert!(store.row("rowId-1").unwrap().is_complete());

        store.upsert_row(
            MappingRow::new("rowId-2", "ds", "de", ""),
            CategoryOptionFilterMap::new(),
        );
        assert!(!store.row("rowId-2").unwrap().is_complete());
        assert!(store.remove_row("rowId-1").is_some());
        assert!(store.remove_row("rowId-1").is_none());
    }
}
