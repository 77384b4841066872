//! Tests for models module

use pi_mapping_sdk::models::{
    CategoryOptionFilter, CategoryOptionFilterMap, LineageKey, MappingRow, MappingStore,
    ProgramIndicator,
};
use pi_mapping_sdk::uid::SequenceUidGenerator;
use pi_mapping_sdk::validation::{validate_mapping_row, validate_uid};
use serde_json::json;

mod mapping_store_tests {
    use super::*;

    fn store() -> MappingStore {
        serde_json::from_value(json!({
            "generateIndicators": true,
            "dePiMaps": {
                "rowId-u0000000001": {
                    "rowId": "rowId-u0000000001",
                    "dsUid": "dsUid000001",
                    "dsName": "ANC",
                    "deUid": "deUid000001",
                    "deName": "ANC 1st visit",
                    "piUid": "piUid000001",
                    "piName": "ANC 1st visit",
                    "coFilters": {"coMale00001": {"name": "Male", "filter": "#{gender} == 'male'"}}
                }
            },
            "coMaps": {
                "coMale00001": {"name": "Male", "filter": "#{sex} == 'M'"},
                "coFemale001": {"name": "Female", "filter": "#{sex} == 'F'"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_store_document() {
        let store = store();
        assert!(store.generate_indicators);
        let row = store.row("rowId-u0000000001").unwrap();
        assert_eq!(row.ds_name, "ANC");
        assert!(row.is_complete());
        assert!(validate_mapping_row(row).is_ok());
    }

    #[test]
    fn test_row_filters_take_precedence() {
        let store = store();
        let row = store.row("rowId-u0000000001").unwrap();
        let filters = store.effective_filter_map(row);
        assert_eq!(filters["coMale00001"].filter, "#{gender} == 'male'");
        assert_eq!(filters["coFemale001"].filter, "#{sex} == 'F'");
        assert_eq!(
            filters.get("coFemale001"),
            Some(&CategoryOptionFilter::new("Female", "#{sex} == 'F'"))
        );
        assert_eq!(filters.get("coUnknown01"), None);
    }

    #[test]
    fn test_new_rows_and_removal() {
        let mut store = MappingStore::default();
        let mut uids = SequenceUidGenerator::default();
        let row_id = MappingRow::new_id(&mut uids);
        assert_eq!(row_id, "rowId-u0000000001");

        let mut shared = CategoryOptionFilterMap::new();
        shared.insert(
            "coMale00001".to_string(),
            CategoryOptionFilter::new("Male", "#{sex} == 'M'"),
        );
        store.upsert_row(
            MappingRow::new(&row_id, "dsUid000001", "deUid000001", "piUid000001"),
            shared,
        );
        assert!(store.co_maps.contains_key("coMale00001"));
        assert!(store.row(&row_id).is_some());

        assert!(store.remove_row(&row_id).is_some());
        assert!(store.remove_row(&row_id).is_none());
        // shared filters outlive the row
        assert!(store.co_maps.contains_key("coMale00001"));
    }

    #[test]
    fn test_incomplete_row() {
        let row = MappingRow::new("rowId-1", "dsUid000001", "", "piUid000001");
        assert!(!row.is_complete());
        assert!(validate_mapping_row(&row).is_err());
    }
}

mod lineage_tests {
    use super::*;

    #[test]
    fn test_row_ids_with_dashes() {
        let key: LineageKey = "rowId-Ab3dE5gH9jK-aocUid00001-cocUid00001".parse().unwrap();
        assert_eq!(key.row_id, "rowId-Ab3dE5gH9jK");
        assert_eq!(key.aoc_uid, "aocUid00001");
        assert_eq!(key.coc_uid, "cocUid00001");
        assert_eq!(key.to_string(), "rowId-Ab3dE5gH9jK-aocUid00001-cocUid00001");
    }

    #[test]
    fn test_prefix_rows_do_not_match() {
        let description = Some("rowId-10-aocUid00001-cocUid00001");
        assert!(LineageKey::belongs_to_row(description, "rowId-10"));
        assert!(!LineageKey::belongs_to_row(description, "rowId-1"));
        assert!(!LineageKey::belongs_to_row(Some("hand written"), "rowId-1"));
        assert!(!LineageKey::belongs_to_row(None, "rowId-1"));
    }
}

mod program_indicator_tests {
    use super::*;

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let value = json!({
            "id": "piUid000001",
            "name": "ANC",
            "program": {"id": "progUid0001"},
            "decimals": 2,
            "analyticsPeriodBoundaries": [{"id": "apbUid00001", "boundaryTarget": "EVENT_DATE"}]
        });
        let pi: ProgramIndicator = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(pi.extra.get("decimals"), Some(&json!(2)));
        assert_eq!(
            pi.analytics_period_boundaries[0].extra.get("boundaryTarget"),
            Some(&json!("EVENT_DATE"))
        );

        let back = serde_json::to_value(&pi).unwrap();
        assert_eq!(back["program"], value["program"]);
        assert_eq!(back["analyticsPeriodBoundaries"], value["analyticsPeriodBoundaries"]);
    }

    #[test]
    fn test_uid_format() {
        assert!(validate_uid("piUid000001").is_ok());
        assert!(validate_uid("pi-uid-0001").is_err());
    }
}
