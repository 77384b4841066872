//! New row command implementation

use crate::cli::error::CliError;
use crate::cli::input::{read_document_or_default, write_document};
use crate::models::{MappingRow, MappingStore};
use crate::uid::RandomUidGenerator;
use crate::validation::validate_mapping_row;
use std::path::PathBuf;

/// Arguments for the new-row command
#[derive(Debug, Clone)]
pub struct NewRowArgs {
    pub store: PathBuf,
    pub ds_uid: String,
    pub de_uid: String,
    pub pi_uid: String,
    pub ds_name: Option<String>,
    pub de_name: Option<String>,
    pub pi_name: Option<String>,
}

/// Handle the new-row command, printing the id of the new row
pub fn handle_new_row(args: &NewRowArgs) -> Result<(), CliError> {
    let mut store: MappingStore = read_document_or_default(&args.store)?;

    let mut row = MappingRow::new(
        MappingRow::new_id(&mut RandomUidGenerator::new()),
        args.ds_uid.clone(),
        args.de_uid.clone(),
        args.pi_uid.clone(),
    );
    row.ds_name = args.ds_name.clone().unwrap_or_default();
    row.de_name = args.de_name.clone().unwrap_or_default();
    row.pi_name = args.pi_name.clone().unwrap_or_default();
    validate_mapping_row(&row).map_err(|e| CliError::ValidationError(e.to_string()))?;

    let row_id = row.row_id.clone();
    store.upsert_row(row, Default::default());
    write_document(&args.store, &store)?;

    println!("{}", row_id);
    Ok(())
}
