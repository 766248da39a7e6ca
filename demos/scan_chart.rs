//! Scans chart archives and prints the decision for each.
//!
//! This example shows how to:
//! - Scan a `.tgz` chart from disk
//! - Branch on the violated policy
//! - Turn a scan result into an upload decision
//!
//! Run with: cargo run --example scan_chart [-- path/to/chart.tgz]
//!
//! Without a path, a clean and a tampered chart are built in memory.

use chartscan::prelude::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

fn build_chart(readme: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in [
        ("demo/Chart.yaml", "apiVersion: v2\nname: demo\nversion: 0.1.0\n"),
        ("demo/values.yaml", "replicaCount: 1\n"),
        ("demo/README.md", readme),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, content.as_bytes())?;
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&builder.into_inner()?)?;
    Ok(encoder.finish()?)
}

fn report(label: &str, result: &ScanResult<ScanReport>) {
    println!("\n=== {label} ===");
    match result {
        Ok(report) => {
            println!("Archive: {}", report.archive_hash);
            println!(
                "Entries: {} seen, {} inspected",
                report.entries_seen, report.entries_inspected
            );
        }
        Err(err) => match err.violation() {
            Some(violation) => {
                println!("Policy: {}", violation.policy);
                println!("Violation: {}", violation.violation);
                if let Some(diff) = &violation.context {
                    println!("{diff}");
                }
            }
            None => println!("Error: {err}"),
        },
    }
    println!("Decision: {:?}", PolicyAction::from_scan(result));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chartscan=info")),
        )
        .init();

    let scanner = ChartScanner::new();

    if let Some(path) = std::env::args().nth(1) {
        let file = std::fs::File::open(&path)?;
        report(&path, &scanner.scan(file));
        return Ok(());
    }

    let clean = build_chart("# demo\n\nA <b>demo</b> chart.\n")?;
    report("clean chart", &scanner.scan(clean.as_slice()));

    let tampered = build_chart("# demo\n\n<img src=x onerror=\"fetch('//evil')\">\n")?;
    report("tampered chart", &scanner.scan(tampered.as_slice()));

    Ok(())
}
