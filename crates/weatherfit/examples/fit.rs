//! Example: Fit a temperature model to a weather history export.
//!
//! Usage:
//!   cargo run --example fit -- <file_path> [seed]
//!
//! Example:
//!   cargo run --example fit -- data/weatherHistory.csv 42

use std::env;
use std::path::Path;

use weatherfit::{Parser, Pipeline, PipelineConfig};

fn main() -> weatherfit::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example fit -- <file_path> [seed]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example fit -- data/weatherHistory.csv 42");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let mut config = PipelineConfig::default();
    if let Some(seed) = args.get(2).and_then(|s| s.parse().ok()) {
        config = config.with_seed(seed);
    }

    let (table, source) = Parser::new().parse_file(path)?;
    let report = Pipeline::with_config(config).run(&table.rows)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("weatherfit: {} ({} rows, {})", source.file, source.row_count, source.format);
    println!("{}", separator);
    println!();

    println!(
        "Cleaning: kept {} of {} rows",
        report.cleaning.rows_kept, report.cleaning.rows_in
    );
    for (column, count) in &report.cleaning.missing_by_column {
        println!("  missing {:28} {}", column, count);
    }
    for (column, count) in &report.cleaning.invalid_by_column {
        println!("  invalid {:28} {}", column, count);
    }
    println!(
        "Split: {} train / {} test (seed {})",
        report.train_size, report.test_size, report.seed
    );
    println!();

    println!("Model: {} =", report.target_name);
    for (name, weight) in report.feature_names.iter().zip(&report.parameters.weights) {
        println!("  {:+12.6} * {}", weight, name);
    }
    println!("  {:+12.6}", report.parameters.intercept);
    println!();

    println!("MSE:  {:.4}", report.metrics.mse);
    println!("RMSE: {:.4}", report.metrics.rmse);
    println!("MAE:  {:.4}", report.metrics.mae);
    println!("R²:   {}", report.metrics.r_squared);

    Ok(())
}
