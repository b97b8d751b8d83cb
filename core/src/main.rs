use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;
use tbiextract_core::cli::{collect_report_files, report_id, Cli, OutputFormat};
use tbiextract_core::{ReportExtractor, ReportResult, TextReport, TsvReport};

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    // Invalid options fail before any report is read
    let extractor = match ReportExtractor::new(cli.options()) {
        Ok(extractor) => extractor,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let files = match collect_report_files(&cli.paths) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to collect reports: {}", e);
            eprintln!("Error: Failed to collect reports: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!("Error: No report files (.txt) found");
        process::exit(1);
    }

    info!(
        "Processing {} reports with lexicon {}",
        files.len(),
        extractor.lexicon().version()
    );

    let results = extract_all(&extractor, &files);

    if results.is_empty() {
        eprintln!("Error: No report could be processed");
        process::exit(1);
    }

    info!("Successfully processed {} reports", results.len());

    output_results(&results, cli.format);
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Runs the extractor over every file, skipping unreadable or failing ones
fn extract_all(extractor: &ReportExtractor, files: &[PathBuf]) -> Vec<(String, ReportResult)> {
    let mut results = Vec::new();

    for path in files {
        let id = report_id(path);
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        match extractor.extract_report(&id, &text) {
            Ok(result) => {
                info!(
                    "Processed: {} ({} skipped sentences)",
                    path.display(),
                    result.warnings.len()
                );
                results.push((id, result));
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    results
}

fn output_results(results: &[(String, ReportResult)], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for (id, result) in results {
                println!("{}", TextReport::new(id, result));
            }
        }
        OutputFormat::Tsv => {
            println!("{}", TsvReport::HEADER);
            for (id, result) in results {
                print!("{}", TsvReport::new(id, result));
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(results) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(results: &[(String, ReportResult)]) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct ReportJson<'a> {
        report: &'a str,
        #[serde(flatten)]
        result: &'a ReportResult,
    }

    let reports: Vec<_> = results
        .iter()
        .map(|(id, result)| ReportJson { report: id, result })
        .collect();

    serde_json::to_string_pretty(&reports)
}
