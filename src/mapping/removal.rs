//! Removal of everything generated for a mapping row
//!
//! Used when a row is deleted from the mapping configuration. Program
//! indicators and indicators are matched by lineage key; groups by name.

use crate::models::{GeneratedMetadata, IdRef, LineageKey, mentions_row};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Metadata to delete when a mapping row is removed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalPlan {
    pub program_indicators: Vec<IdRef>,
    pub program_indicator_groups: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicator_groups: Vec<IdRef>,
}

impl RemovalPlan {
    pub fn is_empty(&self) -> bool {
        self.program_indicators.is_empty()
            && self.program_indicator_groups.is_empty()
            && self.indicators.is_empty()
            && self.indicator_groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.program_indicators.len()
            + self.program_indicator_groups.len()
            + self.indicators.len()
            + self.indicator_groups.len()
    }
}

/// Plan the deletion of all metadata generated for `row_id`
///
/// Indicators and indicator groups are only included when indicator
/// generation is enabled, mirroring what generation creates.
pub fn plan_row_removal(
    row_id: &str,
    generated: &GeneratedMetadata,
    include_indicators: bool,
) -> RemovalPlan {
    let mut plan = RemovalPlan {
        program_indicators: generated
            .program_indicators
            .iter()
            .filter(|pi| LineageKey::belongs_to_row(pi.description.as_deref(), row_id))
            .map(|pi| IdRef::new(&pi.id))
            .collect(),
        program_indicator_groups: generated
            .program_indicator_groups
            .iter()
            .filter(|group| mentions_row(&group.name, row_id))
            .map(|group| IdRef::new(&group.id))
            .collect(),
        ..Default::default()
    };

    if include_indicators {
        plan.indicators = generated
            .indicators
            .iter()
            .filter(|ind| LineageKey::belongs_to_row(ind.description.as_deref(), row_id))
            .map(|ind| IdRef::new(&ind.id))
            .collect();
        plan.indicator_groups = generated
            .indicator_groups
            .iter()
            .filter(|group| group.belongs_to_row(row_id))
            .map(|group| IdRef::new(&group.id))
            .collect();
    }

    info!("Planned removal of {} objects for row {}", plan.len(), row_id);
    plan
}
