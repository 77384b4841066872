//! Metadata import payloads
//!
//! A [`MutationPlan`] is the ordered list of metadata import requests that
//! applies a [`MappingResult`] or a [`RemovalPlan`]. Deletes always come
//! first so the replacements do not collide with the metadata they replace.

use super::{ExportError, ExportResult};
use crate::mapping::{MappingResult, RemovalPlan};
use crate::models::{IdRef, Indicator, IndicatorGroup, ProgramIndicator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the metadata API should apply a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStrategy {
    /// Create objects, replacing any object that already has the UID
    #[serde(rename = "CREATE_AND_UPDATE")]
    CreateOrReplace,
    #[serde(rename = "DELETE")]
    Delete,
}

impl ImportStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStrategy::CreateOrReplace => "CREATE_AND_UPDATE",
            ImportStrategy::Delete => "DELETE",
        }
    }
}

/// Body of a metadata import request
///
/// Objects are kept as JSON values: delete payloads only need UIDs while
/// create payloads carry full objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPayload {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub program_indicators: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub program_indicator_groups: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicator_groups: Vec<Value>,
}

impl MetadataPayload {
    pub fn is_empty(&self) -> bool {
        self.program_indicators.is_empty()
            && self.program_indicator_groups.is_empty()
            && self.indicators.is_empty()
            && self.indicator_groups.is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.program_indicators.len()
            + self.program_indicator_groups.len()
            + self.indicators.len()
            + self.indicator_groups.len()
    }
}

/// One metadata import request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataImport {
    pub import_strategy: ImportStrategy,
    pub payload: MetadataPayload,
}

impl MetadataImport {
    /// Query string for the metadata endpoint
    pub fn query(&self) -> String {
        format!("importStrategy={}", self.import_strategy.as_str())
    }
}

/// Ordered metadata imports for one row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationPlan {
    pub row_id: String,
    pub steps: Vec<MetadataImport>,
}

fn to_values<T: Serialize>(items: &[T]) -> Result<Vec<Value>, ExportError> {
    items
        .iter()
        .map(|item| {
            serde_json::to_value(item).map_err(|e| ExportError::SerializationError(e.to_string()))
        })
        .collect()
}

fn id_values(ids: impl IntoIterator<Item = IdRef>) -> Result<Vec<Value>, ExportError> {
    to_values(&ids.into_iter().collect::<Vec<_>>())
}

impl MutationPlan {
    /// Plan for a generation result: optional delete step, then create-or-replace
    pub fn from_mapping_result(row_id: &str, result: &MappingResult) -> Result<Self, ExportError> {
        let mut steps = Vec::with_capacity(2);

        if result.needs_delete {
            let delete = &result.delete_metadata;
            steps.push(MetadataImport {
                import_strategy: ImportStrategy::Delete,
                payload: MetadataPayload {
                    program_indicators: id_values(
                        delete
                            .program_indicators
                            .iter()
                            .map(|pi: &ProgramIndicator| IdRef::new(&pi.id)),
                    )?,
                    indicators: to_values(&delete.indicators)?,
                    ..Default::default()
                },
            });
        }

        let create = &result.create_update_metadata;
        steps.push(MetadataImport {
            import_strategy: ImportStrategy::CreateOrReplace,
            payload: MetadataPayload {
                program_indicators: to_values::<ProgramIndicator>(&create.program_indicators)?,
                indicators: to_values::<Indicator>(&create.indicators)?,
                indicator_groups: to_values::<IndicatorGroup>(&create.indicator_groups)?,
                ..Default::default()
            },
        });

        Ok(Self {
            row_id: row_id.to_string(),
            steps,
        })
    }

    /// Plan for removing a row: a single delete step, or nothing
    pub fn from_removal(row_id: &str, plan: &RemovalPlan) -> Result<Self, ExportError> {
        let mut steps = Vec::new();
        if !plan.is_empty() {
            steps.push(MetadataImport {
                import_strategy: ImportStrategy::Delete,
                payload: MetadataPayload {
                    program_indicators: to_values(&plan.program_indicators)?,
                    program_indicator_groups: to_values(&plan.program_indicator_groups)?,
                    indicators: to_values(&plan.indicators)?,
                    indicator_groups: to_values(&plan.indicator_groups)?,
                },
            });
        }
        Ok(Self {
            row_id: row_id.to_string(),
            steps,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|step| step.payload.is_empty())
    }

    /// Objects touched across all steps
    pub fn object_count(&self) -> usize {
        self.steps.iter().map(|step| step.payload.object_count()).sum()
    }
}

/// Renders mutation plans in a text format
#[derive(Debug, Default)]
pub struct PlanExporter;

impl PlanExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export plans as `json` or `yaml`
    pub fn export(&self, plans: &[MutationPlan], format: &str) -> Result<ExportResult, ExportError> {
        let content = match format {
            "json" => serde_json::to_string_pretty(plans)
                .map_err(|e| ExportError::SerializationError(e.to_string()))?,
            "yaml" | "yml" => serde_yaml::to_string(plans)
                .map_err(|e| ExportError::SerializationError(e.to_string()))?,
            other => return Err(ExportError::UnsupportedFormat(other.to_string())),
        };
        Ok(ExportResult {
            content,
            format: format.to_string(),
        })
    }
}
