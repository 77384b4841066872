//! Remove command implementation

use super::load_config;
use crate::cli::error::CliError;
use crate::cli::input::{read_document, write_document, write_output};
use crate::export::{MutationPlan, PlanExporter};
use crate::mapping::plan_row_removal;
use crate::models::{GeneratedMetadata, MappingStore};
use std::path::PathBuf;

/// Arguments for the remove command
#[derive(Debug, Clone)]
pub struct RemoveArgs {
    pub workspace: PathBuf,
    pub store: PathBuf,
    pub generated: PathBuf,
    pub row: String,
    pub format: String,
    pub output: Option<PathBuf>,
    /// Also drop the row from the store file
    pub update_store: bool,
}

/// Handle the remove command
pub fn handle_remove(args: &RemoveArgs) -> Result<(), CliError> {
    let mut store: MappingStore = read_document(&args.store)?;
    let generated: GeneratedMetadata = read_document(&args.generated)?;
    let config = load_config(&args.workspace, &store)?;

    let removal = plan_row_removal(&args.row, &generated, config.generate_indicators());
    let plan = MutationPlan::from_removal(&args.row, &removal)?;
    let plans = if plan.is_empty() {
        eprintln!("Nothing generated for row {}", args.row);
        Vec::new()
    } else {
        eprintln!("Row {}: {} objects to delete", args.row, plan.object_count());
        vec![plan]
    };
    let export = PlanExporter::new().export(&plans, &args.format)?;
    write_output(args.output.as_deref(), &export.content)?;

    if args.update_store {
        if store.remove_row(&args.row).is_none() {
            return Err(CliError::InvalidArgument(format!(
                "Row {} is not in {}",
                args.row,
                args.store.display()
            )));
        }
        write_document(&args.store, &store)?;
    }
    Ok(())
}
