//! CLI binary entry point for pi-mapping-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use pi_mapping_sdk::cli::commands::config::handle_validate_config;
#[cfg(feature = "cli")]
use pi_mapping_sdk::cli::commands::generate::{GenerateArgs, handle_generate};
#[cfg(feature = "cli")]
use pi_mapping_sdk::cli::commands::remove::{RemoveArgs, handle_remove};
#[cfg(feature = "cli")]
use pi_mapping_sdk::cli::commands::rows::{NewRowArgs, handle_new_row};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pi-mapping-cli")]
#[command(about = "Generate disaggregated program indicators from data element mappings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Generate metadata for mapping rows and print the mutation plans
    Generate {
        /// Mapping store document (.json, .yaml)
        #[arg(short, long)]
        store: PathBuf,
        /// Base metadata snapshot: data sets, data elements, program indicators, indicator types
        #[arg(short, long)]
        metadata: PathBuf,
        /// Metadata generated by earlier runs
        #[arg(short, long)]
        generated: Option<PathBuf>,
        /// Row to generate, repeatable (default: every row in the store)
        #[arg(short, long = "row")]
        rows: Vec<String>,
        /// Workspace holding .pi-mapping.toml (default: current directory)
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormatArg,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Plan the deletion of everything generated for a mapping row
    Remove {
        /// Row id to remove
        row: String,
        /// Mapping store document (.json, .yaml)
        #[arg(short, long)]
        store: PathBuf,
        /// Metadata generated by earlier runs
        #[arg(short, long)]
        generated: PathBuf,
        /// Workspace holding .pi-mapping.toml (default: current directory)
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormatArg,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also remove the row from the store document
        #[arg(long)]
        update_store: bool,
    },
    /// Add a mapping row to the store and print its id
    NewRow {
        /// Mapping store document, created when missing
        #[arg(short, long)]
        store: PathBuf,
        /// Data set UID
        #[arg(long)]
        ds: String,
        /// Data element UID
        #[arg(long)]
        de: String,
        /// Program indicator UID
        #[arg(long)]
        pi: String,
        #[arg(long)]
        ds_name: Option<String>,
        #[arg(long)]
        de_name: Option<String>,
        #[arg(long)]
        pi_name: Option<String>,
    },
    /// Check the workspace configuration
    ValidateConfig {
        /// Workspace holding .pi-mapping.toml (default: current directory)
        #[arg(default_value = ".")]
        workspace: PathBuf,
    },
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormatArg {
    Json,
    Yaml,
}

#[cfg(feature = "cli")]
fn convert_output_format(format: OutputFormatArg) -> String {
    match format {
        OutputFormatArg::Json => "json".to_string(),
        OutputFormatArg::Yaml => "yaml".to_string(),
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            store,
            metadata,
            generated,
            rows,
            workspace,
            format,
            output,
        } => {
            let args = GenerateArgs {
                workspace,
                store,
                metadata,
                generated,
                rows,
                format: convert_output_format(format),
                output,
            };
            handle_generate(&args)
        }
        Commands::Remove {
            row,
            store,
            generated,
            workspace,
            format,
            output,
            update_store,
        } => {
            let args = RemoveArgs {
                workspace,
                store,
                generated,
                row,
                format: convert_output_format(format),
                output,
                update_store,
            };
            handle_remove(&args)
        }
        Commands::NewRow {
            store,
            ds,
            de,
            pi,
            ds_name,
            de_name,
            pi_name,
        } => {
            let args = NewRowArgs {
                store,
                ds_uid: ds,
                de_uid: de,
                pi_uid: pi,
                ds_name,
                de_name,
                pi_name,
            };
            handle_new_row(&args)
        }
        Commands::ValidateConfig { workspace } => handle_validate_config(&workspace),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
