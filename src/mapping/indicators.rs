//! Indicator synthesis
//!
//! Each generated program indicator gets an indicator wrapping it
//! (`I{programIndicatorUid}` over `1`) so it can be grouped and exported
//! through the aggregate analytics API. Indicators keep their UID across
//! regenerations: an existing indicator with the same lineage key is reused.

use super::{MappingError, Result};
use crate::models::{
    AttributeValue, INDICATOR_GROUP_PREFIX, IdRef, Indicator, IndicatorGroup, IndicatorType,
    ProgramIndicator,
};
use crate::uid::UidGenerator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Indicators to create or update and indicators to delete
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorChanges {
    pub create_update: Vec<Indicator>,
    pub delete: Vec<IdRef>,
}

/// Builds indicators for generated program indicators
#[derive(Debug, Clone)]
pub struct IndicatorSynthesizer<'a> {
    indicator_type_uid: &'a str,
    custom_attribute: &'a str,
}

impl<'a> IndicatorSynthesizer<'a> {
    /// Every indicator uses the first indicator type supplied
    pub fn new(indicator_types: &'a [IndicatorType], custom_attribute: &'a str) -> Result<Self> {
        let indicator_type = indicator_types.first().ok_or_else(|| {
            MappingError::MappingGeneration(
                "No indicator types are available, create an indicator type (e.g. a factor 1 \
                 type) before generating indicators"
                    .to_string(),
            )
        })?;
        Ok(Self {
            indicator_type_uid: &indicator_type.id,
            custom_attribute,
        })
    }

    /// Build the indicator for one generated program indicator
    pub fn indicator_for(&self, uid: String, pi: &ProgramIndicator) -> Result<Indicator> {
        let de_uid = pi.attribute_value(self.custom_attribute).ok_or_else(|| {
            MappingError::MappingGeneration(format!(
                "Program indicator {} does not have de mapping attribute value for custom \
                 attribute {}",
                pi.id, self.custom_attribute
            ))
        })?;

        Ok(Indicator {
            id: uid,
            name: pi.name.clone(),
            short_name: pi.short_name.clone(),
            code: None,
            description: pi.description.clone(),
            numerator: Some(format!("I{{{}}}", pi.id)),
            numerator_description: Some(pi.name.clone()),
            denominator: Some("1".to_string()),
            denominator_description: Some("1".to_string()),
            indicator_type: Some(IdRef::new(self.indicator_type_uid)),
            aggregate_export_category_option_combo: pi
                .aggregate_export_category_option_combo
                .clone(),
            aggregate_export_attribute_option_combo: pi
                .aggregate_export_attribute_option_combo
                .clone(),
            attribute_values: vec![AttributeValue::new(self.custom_attribute, de_uid)],
        })
    }

    /// Indicators for the new generation and those orphaned by it
    ///
    /// `created` are the freshly generated program indicators, `stale` the
    /// program indicators being deleted, `existing` the indicators generated
    /// before for the row.
    pub fn synthesize(
        &self,
        created: &[ProgramIndicator],
        stale: &[ProgramIndicator],
        existing: &[Indicator],
        uids: &mut impl UidGenerator,
    ) -> Result<IndicatorChanges> {
        let mut changes = IndicatorChanges::default();

        for pi in created {
            let uid = match find_by_lineage(existing, pi) {
                Some(indicator) => indicator.id.clone(),
                None => uids.next_uid(),
            };
            changes.create_update.push(self.indicator_for(uid, pi)?);
        }

        for pi in stale {
            if let Some(indicator) = find_by_lineage(existing, pi) {
                changes.delete.push(IdRef::new(&indicator.id));
            }
        }

        debug!(
            "Indicators: {} create/update, {} delete",
            changes.create_update.len(),
            changes.delete.len()
        );
        Ok(changes)
    }
}

fn find_by_lineage<'i>(existing: &'i [Indicator], pi: &ProgramIndicator) -> Option<&'i Indicator> {
    let description = pi.description.as_deref()?;
    existing
        .iter()
        .find(|indicator| indicator.description.as_deref() == Some(description))
}

/// The indicator group of a row, holding exactly `indicators`
///
/// An existing group for the row keeps its UID and name; otherwise a new
/// group is minted whose name links to the analytics data value set export
/// of the group. The member list is always replaced, never merged.
pub fn indicator_group(
    row_id: &str,
    existing: &[IndicatorGroup],
    indicators: &[Indicator],
    custom_attribute: &str,
    uids: &mut impl UidGenerator,
) -> IndicatorGroup {
    let members: Vec<IdRef> = indicators.iter().map(|ind| IdRef::new(&ind.id)).collect();

    if let Some(group) = existing
        .iter()
        .find(|group| group.belongs_to_row(row_id))
    {
        debug!("Reusing indicator group {} for row {}", group.id, row_id);
        return IndicatorGroup {
            id: group.id.clone(),
            name: group.name.clone(),
            indicators: members,
        };
    }

    let uid = uids.next_uid();
    IndicatorGroup {
        name: format!(
            "{}{} (/api/analytics/dataValueSet.json?dimension=dx:IN_GROUP-{}\
             &outputIdScheme=ATTRIBUTE:{})  (generated)",
            INDICATOR_GROUP_PREFIX, row_id, uid, custom_attribute
        ),
        id: uid,
        indicators: members,
    }
}
