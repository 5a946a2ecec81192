//! Output formatting module
//!
//! Lists render as a table, CSV, JSON or YAML; single resources fetched
//! by ID print the API payload as returned.

mod access_rules;
mod app_config;
mod common;
mod table;

use crate::cli::OutputFormat;
use crate::error::Result;

pub use common::{escape_csv, output_raw, print_json, print_yaml, to_json_string, to_yaml_string};
pub use table::{render_csv, render_table, Tabular};

/// Print a list of resources in the requested format
pub fn output_list<T: Tabular>(
    items: &[T],
    format: OutputFormat,
    no_header: bool,
    label: &str,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!();
            println!("{}", render_table(items, no_header));
            if !no_header {
                println!("\nTotal: {} {}", items.len(), label);
            }
        }
        OutputFormat::Csv => println!("{}", render_csv(items, no_header)),
        OutputFormat::Json => print_json(items)?,
        OutputFormat::Yaml => print_yaml(items)?,
    }
    Ok(())
}
