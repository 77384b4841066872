//! Program indicator synthesis
//!
//! Every combined filter becomes one program indicator derived from the
//! mapping row's source program indicator. Derived indicators always get a
//! fresh UID, so the caller applies them as create-or-replace after removing
//! the row's previous generation.

use crate::models::{
    AnalyticsPeriodBoundary, AttributeValue, CombinedFilter, LineageKey, ProgramIndicator,
};
use crate::uid::UidGenerator;
use tracing::debug;

/// Row level values shared by every program indicator generated for a row
#[derive(Debug, Clone)]
pub struct RowContext<'a> {
    pub row_id: &'a str,
    /// Data element UID stamped on the custom attribute
    pub de_uid: &'a str,
    /// Row fingerprint used in short names
    pub combined_uid: String,
    /// Custom attribute carrying the data element UID
    pub custom_attribute: &'a str,
}

impl<'a> RowContext<'a> {
    pub fn new(
        row_id: &'a str,
        ds_uid: &str,
        de_uid: &'a str,
        pi_uid: &str,
        custom_attribute: &'a str,
    ) -> Self {
        Self {
            row_id,
            de_uid,
            combined_uid: combined_uid(ds_uid, de_uid, pi_uid),
            custom_attribute,
        }
    }
}

fn uid_prefix(uid: &str) -> &str {
    uid.char_indices().nth(3).map_or(uid, |(end, _)| &uid[..end])
}

/// Row fingerprint: first three characters of each source UID
pub fn combined_uid(ds_uid: &str, de_uid: &str, pi_uid: &str) -> String {
    format!(
        "{}-{}-{}",
        uid_prefix(ds_uid),
        uid_prefix(de_uid),
        uid_prefix(pi_uid)
    )
}

impl ProgramIndicator {
    /// Derive the program indicator generated for one combined filter
    ///
    /// Copied from the template: `expression`, unknown fields, and the
    /// analytics period boundaries without their `id`.
    /// Cleared: `code`.
    /// Overwritten: `id`, `name`, `shortName`, `description` (lineage key),
    /// `filter`, `attributeValues`, and both aggregate export combos.
    pub fn derive_generated(
        &self,
        uid: String,
        row: &RowContext<'_>,
        combined: &CombinedFilter,
    ) -> ProgramIndicator {
        let lineage = LineageKey::new(row.row_id, &combined.aoc_uid, &combined.coc_uid);
        ProgramIndicator {
            id: uid,
            name: format!("{}{} ({})", self.name, combined.suffix, row.row_id),
            short_name: Some(format!(
                "{}-{}-{}",
                combined.aoc_uid, combined.coc_uid, row.combined_uid
            )),
            code: None,
            description: Some(lineage.to_string()),
            expression: self.expression.clone(),
            filter: Some(combined.filter.clone()),
            analytics_period_boundaries: self
                .analytics_period_boundaries
                .iter()
                .map(|boundary| AnalyticsPeriodBoundary {
                    id: None,
                    extra: boundary.extra.clone(),
                })
                .collect(),
            attribute_values: vec![AttributeValue::new(row.custom_attribute, row.de_uid)],
            aggregate_export_category_option_combo: Some(combined.coc_uid.clone()),
            aggregate_export_attribute_option_combo: Some(combined.aoc_uid.clone()),
            extra: self.extra.clone(),
        }
    }
}

/// One program indicator per combined filter, in combined filter order
pub fn synthesize_program_indicators(
    row: &RowContext<'_>,
    template: &ProgramIndicator,
    combined: &[CombinedFilter],
    uids: &mut impl UidGenerator,
) -> Vec<ProgramIndicator> {
    combined
        .iter()
        .map(|filter| template.derive_generated(uids.next_uid(), row, filter))
        .collect()
}

/// Previously generated program indicators belonging to `row_id`
///
/// Every one of them is replaced by the current generation, so all are
/// returned for deletion regardless of whether the same combination is
/// generated again.
pub fn stale_program_indicators(
    row_id: &str,
    generated: &[ProgramIndicator],
) -> Vec<ProgramIndicator> {
    let stale: Vec<ProgramIndicator> = generated
        .iter()
        .filter(|pi| LineageKey::belongs_to_row(pi.description.as_deref(), row_id))
        .cloned()
        .collect();
    debug!(
        "{} of {} generated program indicators belong to row {}",
        stale.len(),
        generated.len(),
        row_id
    );
    stale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uid::SequenceUidGenerator;
    use serde_json::{Map, Value};

    fn template() -> ProgramIndicator {
        let mut extra = Map::new();
        extra.insert("boundaryTarget".to_string(), Value::from("EVENT_DATE"));
        let mut pi = ProgramIndicator::new("piSource001", "ANC visits");
        pi.code = Some("ANC_VISITS".to_string());
        pi.expression = Some("V{event_count}".to_string());
        pi.filter = Some("d2:hasValue('abc')".to_string());
        pi.analytics_period_boundaries = vec![AnalyticsPeriodBoundary {
            id: Some("apb00000001".to_string()),
            extra,
        }];
        pi.extra
            .insert("analyticsType".to_string(), Value::from("EVENT"));
        pi
    }

    fn combined() -> CombinedFilter {
        CombinedFilter {
            coc_uid: "cocUid00001".to_string(),
            aoc_uid: "aocUid00001".to_string(),
            filter: "(d2:hasValue('abc')) && (#{sex} == 'M')".to_string(),
            suffix: " (Male)".to_string(),
        }
    }

    #[test]
    fn combined_uid_takes_three_characters_each() {
        assert_eq!(
            combined_uid("dsUid000001", "deUid000001", "piUid000001"),
            "dsU-deU-piU"
        );
        assert_eq!(combined_uid("ab", "c", ""), "ab-c-");
    }

    #[test]
    fn derived_indicator_fields() {
        let row = RowContext::new(
            "rowId-1",
            "dsUid000001",
            "deUid000001",
            "piSource001",
            "attrUid0001",
        );
        let source = template();
        let pi = source.derive_generated("newUid00001".to_string(), &row, &combined());

        assert_eq!(pi.id, "newUid00001");
        assert_eq!(pi.name, "ANC visits (Male) (rowId-1)");
        assert_eq!(
            pi.short_name.as_deref(),
            Some("aocUid00001-cocUid00001-dsU-deU-piS")
        );
        assert_eq!(
            pi.description.as_deref(),
            Some("rowId-1-aocUid00001-cocUid00001")
        );
        assert_eq!(pi.code, None);
        assert_eq!(pi.expression, source.expression);
        assert_eq!(
            pi.filter.as_deref(),
            Some("(d2:hasValue('abc')) && (#{sex} == 'M')")
        );
        assert_eq!(
            pi.attribute_values,
            vec![AttributeValue::new("attrUid0001", "deUid000001")]
        );
        assert_eq!(
            pi.aggregate_export_category_option_combo.as_deref(),
            Some("cocUid00001")
        );
        assert_eq!(
            pi.aggregate_export_attribute_option_combo.as_deref(),
            Some("aocUid00001")
        );
        assert_eq!(pi.analytics_period_boundaries[0].id, None);
        assert_eq!(
            pi.analytics_period_boundaries[0].extra["boundaryTarget"],
            "EVENT_DATE"
        );
        assert_eq!(pi.extra["analyticsType"], "EVENT");

        // template untouched
        assert_eq!(
            source.analytics_period_boundaries[0].id.as_deref(),
            Some("apb00000001")
        );
        assert_eq!(source.code.as_deref(), Some("ANC_VISITS"));
    }

    #[test]
    fn synthesizes_one_per_combined_filter() {
        let row = RowContext::new("rowId-1", "ds", "de", "pi", "attr");
        let mut second = combined();
        second.coc_uid = "cocUid00002".to_string();
        let pis = synthesize_program_indicators(
            &row,
            &template(),
            &[combined(), second],
            &mut SequenceUidGenerator::default(),
        );
        assert_eq!(pis.len(), 2);
        assert_eq!(pis[0].id, "u0000000001");
        assert_eq!(pis[1].id, "u0000000002");
        assert_ne!(pis[0].description, pis[1].description);
    }

    #[test]
    fn stale_selection_matches_row_exactly() {
        let mut own = ProgramIndicator::new("old00000001", "old");
        own.description = Some("rowId-1-aoc-coc".to_string());
        let mut other = ProgramIndicator::new("old00000002", "other");
        other.description = Some("rowId-10-aoc-coc".to_string());
        let untagged = ProgramIndicator::new("old00000003", "untagged");

        let stale = stale_program_indicators("rowId-1", &[own, other, untagged]);
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].id, "old00000001");
    }
}
