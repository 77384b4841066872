//! Mapping generator
//!
//! Runs the full generation pass for a mapping row:
//! data set and data element COC filters -> combined filters -> program
//! indicators -> (optionally) indicators and the row's indicator group.
//! The whole result is computed before anything is returned, so an error
//! never leaves the caller with a partial set of changes.

use super::filters::{base_filter, coc_filters, combine_filters, find_by_uid};
use super::indicators::{IndicatorSynthesizer, indicator_group};
use super::program_indicators::{
    RowContext, stale_program_indicators, synthesize_program_indicators,
};
use super::{MappingError, MetadataKind, Result};
use crate::config::{ConfigError, MappingConfig};
use crate::models::{
    BaseMetadata, CategoryOptionFilterMap, GeneratedMetadata, IdRef, Indicator, IndicatorGroup,
    MappingRow, MappingStore, ProgramIndicator,
};
use crate::uid::UidGenerator;
use crate::validation::validate_row_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Metadata to create, or replace when the UID already exists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateMetadata {
    pub program_indicators: Vec<ProgramIndicator>,
    pub indicators: Vec<Indicator>,
    pub indicator_groups: Vec<IndicatorGroup>,
}

/// Metadata to delete before applying [`CreateUpdateMetadata`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMetadata {
    pub program_indicators: Vec<ProgramIndicator>,
    pub indicators: Vec<IdRef>,
}

impl DeleteMetadata {
    pub fn is_empty(&self) -> bool {
        self.program_indicators.is_empty() && self.indicators.is_empty()
    }
}

/// Everything a generation pass wants changed for one row
///
/// Deletes must be applied before creates: replaced metadata shares names,
/// short names and sometimes UIDs with its replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "mapping results describe changes that still have to be applied"]
pub struct MappingResult {
    pub create_update_metadata: CreateUpdateMetadata,
    pub delete_metadata: DeleteMetadata,
    pub needs_delete: bool,
}

/// Outcome of one row of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
    pub row_id: String,
    pub status: RowStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RowStatus {
    Generated { result: MappingResult },
    /// The row's metadata needs fixing; `message` explains what
    Failed { message: String },
}

/// Generates mapping metadata using a validated configuration
#[derive(Debug, Clone)]
pub struct MappingGenerator<'c> {
    config: &'c MappingConfig,
}

impl<'c> MappingGenerator<'c> {
    pub fn new(config: &'c MappingConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generate the metadata for one mapping row
    ///
    /// `generated` holds what earlier passes generated for the row; all of
    /// its program indicators tagged with the row are scheduled for deletion.
    pub fn generate_mapping(
        &self,
        row: &MappingRow,
        filter_map: &CategoryOptionFilterMap,
        base: &BaseMetadata,
        generated: &GeneratedMetadata,
        uids: &mut impl UidGenerator,
    ) -> Result<MappingResult> {
        // The row id is embedded in names, lineage keys and the group name
        validate_row_id(&row.row_id).map_err(|e| {
            MappingError::MappingGeneration(format!(
                "Mapping row id {:?} is not usable: {}",
                row.row_id, e
            ))
        })?;

        let custom_attribute = self.config.custom_attribute();

        let ds = find_by_uid(&row.ds_uid, &base.data_sets, MetadataKind::DataSet)?;
        let de = find_by_uid(&row.de_uid, &base.data_elements, MetadataKind::DataElement)?;
        let pi = find_by_uid(
            &row.pi_uid,
            &base.program_indicators,
            MetadataKind::ProgramIndicator,
        )?;

        let ds_filters = coc_filters(ds, filter_map)?;
        let de_filters = coc_filters(de, filter_map)?;
        let combined = combine_filters(&base_filter(pi), &ds_filters, &de_filters);

        if combined.len() > self.config.limits.cross_product_warning {
            warn!(
                "Row {} generates {} program indicators ({} data set x {} data element combos)",
                row.row_id,
                combined.len(),
                ds_filters.len(),
                de_filters.len()
            );
        }

        let context = RowContext::new(
            &row.row_id,
            &row.ds_uid,
            &row.de_uid,
            &row.pi_uid,
            custom_attribute,
        );
        let stale_pis = stale_program_indicators(&row.row_id, &generated.program_indicators);
        let created_pis = synthesize_program_indicators(&context, pi, &combined, uids);

        let mut result = MappingResult::default();
        if self.config.generate_indicators() {
            let synthesizer = IndicatorSynthesizer::new(&base.indicator_types, custom_attribute)?;
            let indicators =
                synthesizer.synthesize(&created_pis, &stale_pis, &generated.indicators, uids)?;
            let group = indicator_group(
                &row.row_id,
                &generated.indicator_groups,
                &indicators.create_update,
                custom_attribute,
                uids,
            );
            result.create_update_metadata.indicators = indicators.create_update;
            result.create_update_metadata.indicator_groups = vec![group];
            result.delete_metadata.indicators = indicators.delete;
        }
        result.create_update_metadata.program_indicators = created_pis;
        result.delete_metadata.program_indicators = stale_pis;
        result.needs_delete = !result.delete_metadata.is_empty();

        info!(
            "Generated {} program indicators and {} indicators for row {} ({} to delete)",
            result.create_update_metadata.program_indicators.len(),
            result.create_update_metadata.indicators.len(),
            row.row_id,
            result.delete_metadata.program_indicators.len() + result.delete_metadata.indicators.len()
        );
        Ok(result)
    }

    /// Generate a stored row, applying its own filters over the shared ones
    pub fn generate_stored_row(
        &self,
        store: &MappingStore,
        row_id: &str,
        base: &BaseMetadata,
        generated: &GeneratedMetadata,
        uids: &mut impl UidGenerator,
    ) -> Result<MappingResult> {
        let row = store
            .row(row_id)
            .ok_or_else(|| MappingError::not_found(MetadataKind::MappingRow, row_id))?;
        let filters = store.effective_filter_map(row);
        self.generate_mapping(row, &filters, base, generated, uids)
    }

    /// Generate several stored rows in order
    ///
    /// A row whose metadata needs fixing is reported as failed and the batch
    /// continues; any other error aborts the batch. Rows missing from
    /// `generated` are treated as never generated.
    pub fn generate_rows(
        &self,
        store: &MappingStore,
        row_ids: &[String],
        base: &BaseMetadata,
        generated: &BTreeMap<String, GeneratedMetadata>,
        uids: &mut impl UidGenerator,
    ) -> Result<Vec<RowOutcome>> {
        let empty = GeneratedMetadata::default();
        let mut outcomes = Vec::with_capacity(row_ids.len());

        for row_id in row_ids {
            let previous = generated.get(row_id).unwrap_or(&empty);
            let status = match self.generate_stored_row(store, row_id, base, previous, uids) {
                Ok(result) => RowStatus::Generated { result },
                Err(e) if e.is_user_facing() => {
                    warn!("Mapping generation failed for row {}: {}", row_id, e);
                    RowStatus::Failed {
                        message: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };
            outcomes.push(RowOutcome {
                row_id: row_id.clone(),
                status,
            });
        }

        Ok(outcomes)
    }
}
