//! Run command - fit and evaluate a temperature model.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;
use weatherfit::{Parser, Pipeline, PipelineReport, RSquared};

use super::{load_config, require_file};

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    ratio: Option<f64>,
    seed: Option<u64>,
    json: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    let mut config = load_config(config.as_deref())?;
    if let Some(ratio) = ratio {
        config = config.with_split_ratio(ratio);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let (table, source) = Parser::new().parse_file(&file)?;
    tracing::info!(file = %source.file, hash = %source.hash, rows = source.row_count, "loaded source");

    let report = Pipeline::with_config(config).run(&table.rows)?;

    if let Some(ref path) = output {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {})",
        "Fitted".cyan().bold(),
        file.display().to_string().white(),
        source.row_count,
        source.format
    );
    print_report(&report, verbose);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_report(report: &PipelineReport, verbose: bool) {
    println!(
        "Kept {} of {} rows ({} dropped in cleaning, {} in extraction)",
        report.rows_extracted.to_string().white().bold(),
        report.cleaning.rows_in,
        report.cleaning.rows_dropped.to_string().yellow(),
        report.rows_dropped_in_extraction.to_string().yellow()
    );
    println!(
        "Split {} train / {} test (ratio {}, seed {})",
        report.train_size, report.test_size, report.split_ratio, report.seed
    );

    if verbose {
        println!();
        println!("{}", "Model:".yellow().bold());
        for (name, weight) in report.feature_names.iter().zip(&report.parameters.weights) {
            println!("  {:28} {:+.6}", name, weight);
        }
        println!("  {:28} {:+.6}", "(intercept)", report.parameters.intercept);
    }

    println!();
    println!("{}", "Test metrics:".yellow().bold());
    println!("  MSE   {:.4}", report.metrics.mse);
    println!("  RMSE  {:.4}", report.metrics.rmse);
    println!("  MAE   {:.4}", report.metrics.mae);
    match report.metrics.r_squared {
        RSquared::Value(r2) if r2 >= 0.9 => println!("  R²    {}", format!("{:.4}", r2).green()),
        RSquared::Value(r2) => println!("  R²    {}", format!("{:.4}", r2).yellow()),
        RSquared::Undefined => println!(
            "  R²    {}",
            "undefined (all test temperatures identical)".red()
        ),
    }
}
