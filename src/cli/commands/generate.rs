//! Generate command implementation

use super::load_config;
use crate::cli::error::CliError;
use crate::cli::input::{read_document, write_output};
use crate::export::{MutationPlan, PlanExporter};
use crate::mapping::{MappingGenerator, RowStatus};
use crate::models::{BaseMetadata, GeneratedMetadata, MappingStore};
use crate::uid::RandomUidGenerator;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Directory holding `.pi-mapping.toml`
    pub workspace: PathBuf,
    pub store: PathBuf,
    /// Data sets, data elements, program indicators and indicator types
    pub metadata: PathBuf,
    /// Metadata generated by earlier runs, if any
    pub generated: Option<PathBuf>,
    /// Rows to generate; all rows of the store when empty
    pub rows: Vec<String>,
    pub format: String,
    pub output: Option<PathBuf>,
}

/// Handle the generate command
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let store: MappingStore = read_document(&args.store)?;
    let base: BaseMetadata = read_document(&args.metadata)?;
    let snapshot: GeneratedMetadata = match &args.generated {
        Some(path) => read_document(path)?,
        None => GeneratedMetadata::default(),
    };
    let config = load_config(&args.workspace, &store)?;
    let generator = MappingGenerator::new(&config)?;

    let row_ids: Vec<String> = if args.rows.is_empty() {
        store.de_pi_maps.keys().cloned().collect()
    } else {
        args.rows.clone()
    };

    // Lineage keys keep each row to its own metadata, so every row can be
    // matched against the whole snapshot.
    let generated: BTreeMap<String, GeneratedMetadata> = row_ids
        .iter()
        .map(|row_id| (row_id.clone(), snapshot.clone()))
        .collect();

    let outcomes = generator.generate_rows(
        &store,
        &row_ids,
        &base,
        &generated,
        &mut RandomUidGenerator::new(),
    )?;

    let mut plans = Vec::new();
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.status {
            RowStatus::Generated { result } => {
                let plan = MutationPlan::from_mapping_result(&outcome.row_id, result)?;
                if plan.is_empty() {
                    eprintln!("Row {}: nothing to import", outcome.row_id);
                    continue;
                }
                eprintln!(
                    "Row {}: {} objects in {} imports",
                    outcome.row_id,
                    plan.object_count(),
                    plan.steps.len()
                );
                plans.push(plan);
            }
            RowStatus::Failed { message } => {
                eprintln!("Row {} failed: {}", outcome.row_id, message);
                failed += 1;
            }
        }
    }

    let export = PlanExporter::new().export(&plans, &args.format)?;
    write_output(args.output.as_deref(), &export.content)?;

    if failed > 0 {
        return Err(CliError::RowsFailed(failed, outcomes.len()));
    }
    Ok(())
}
