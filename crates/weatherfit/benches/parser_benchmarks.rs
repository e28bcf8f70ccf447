//! Parser performance benchmarks.
//!
//! Measures parsing of weather history exports across file sizes and delimiters.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::io::Write;
use tempfile::NamedTempFile;
use weatherfit::Parser;

const HEADER: &str = "Formatted Date,Summary,Precip Type,Temperature (C),Apparent Temperature (C),Humidity,Wind Speed (km/h),Wind Bearing (degrees),Visibility (km),Loud Cover,Pressure (millibars),Daily Summary";

/// Generate a synthetic weather history export.
fn generate_export(rows: usize) -> String {
    let mut data = String::from(HEADER);
    data.push('\n');

    for row in 0..rows {
        let temperature = -5.0 + (row % 40) as f64 * 0.8;
        data.push_str(&format!(
            "2006-{:02}-{:02} {:02}:00:00.000 +0200,Partly Cloudy,{},{:.4},{:.4},{:.2},{:.4},{},{:.4},0,{:.2},\"Mostly cloudy, windy in the evening.\"\n",
            (row / 672) % 12 + 1,
            (row / 24) % 28 + 1,
            row % 24,
            if row % 6 == 0 { "snow" } else { "rain" },
            temperature,
            temperature - 2.1,
            0.5 + (row % 10) as f64 * 0.04,
            (row % 30) as f64 * 0.9,
            row % 360,
            9.0 + (row % 7) as f64,
            1000.0 + (row % 25) as f64,
        ));
    }

    data
}

/// Benchmark parsing CSV files of various sizes.
fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_export(*rows);
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| {
                    let parser = Parser::new();
                    black_box(parser.parse_file(temp.path()).unwrap())
                },
            )
        });
    }

    group.finish();
}

/// Benchmark parsing TSV bytes held in memory.
fn bench_parse_tsv_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_tsv_bytes");

    for rows in [1_000, 10_000].iter() {
        // The summary column holds a comma, so swap it out before re-delimiting.
        let data = generate_export(*rows).replace(", ", " ").replace(',', "\t");
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_bytes(data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_csv, bench_parse_tsv_bytes);
criterion_main!(benches);
