//! Clean command - show what cleaning keeps and drops.

use std::path::PathBuf;

use colored::Colorize;
use weatherfit::{ColumnType, Cleaner, Parser};

use super::{load_config, require_file};

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let config = load_config(config.as_deref())?;

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        file.display().to_string().white()
    );

    let (table, _) = Parser::new().parse_file(&file)?;
    let (cleaned, report) = Cleaner::new(config.schema).clean_with_report(&table.rows)?;

    println!(
        "Kept {} of {} rows ({} dropped)",
        report.rows_kept.to_string().white().bold(),
        report.rows_in,
        report.rows_dropped.to_string().yellow()
    );

    if !report.removed_columns.is_empty() {
        println!("Removed columns: {}", report.removed_columns.join(", "));
    }

    if !report.missing_by_column.is_empty() || !report.invalid_by_column.is_empty() {
        println!();
        println!("{}", "Dropped rows by column:".yellow().bold());
        for (column, count) in &report.missing_by_column {
            println!("  {:28} {} missing", column, count.to_string().red());
        }
        for (column, count) in &report.invalid_by_column {
            println!("  {:28} {} invalid", column, count.to_string().red());
        }
    }

    println!();
    println!("{}", "Columns:".yellow().bold());
    for spec in cleaned.columns() {
        match (spec.column_type, cleaned.categories(&spec.name)) {
            (ColumnType::Categorical, Some(categories)) => {
                let levels: Vec<&str> = categories.levels().collect();
                println!("  {:28} {:12} {}", spec.name, spec.column_type.to_string(), levels.join(", "));
            }
            _ => println!("  {:28} {}", spec.name, spec.column_type),
        }
    }

    if verbose {
        println!();
        println!("{}", "Ignored input columns:".yellow().bold());
        for header in &table.headers {
            if cleaned.column(header).is_none() && !report.removed_columns.contains(header) {
                println!("  {}", header);
            }
        }
    }

    Ok(())
}
