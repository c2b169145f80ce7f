use adrenal_core::cli::export::write_csv_report;
use adrenal_core::cli::{Cli, OutputFormat};
use adrenal_core::{AdrenalEvaluator, Assessment, InputRecord, RuleConfig, TextReport};
use clap::Parser;
use log::{error, info, warn};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let form = cli.to_form();
    let parsed = match form.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    for warning in &parsed.warnings {
        warn!("Ignoring field: {}", warning);
    }

    let config = RuleConfig::default().with_enhancement_threshold_hu(cli.enhancement_threshold);
    info!("Using enhancement threshold: {} HU", config.enhancement_threshold_hu);

    let evaluator = AdrenalEvaluator::new(config);
    let mut assessment = evaluator.evaluate(&parsed.record);
    assessment.warnings.extend(parsed.warnings);

    output_assessment(&parsed.record, &assessment, cli.format);

    if let Some(path) = &cli.csv {
        match write_csv_report(path, &form, &parsed.record, &assessment) {
            Ok(()) => info!("Saved report to {}", path.display()),
            Err(e) => {
                error!("Failed to save report: {}", e);
                eprintln!("Error: Failed to save report: {}", e);
                process::exit(1);
            }
        }
    }
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

fn output_assessment(input: &InputRecord, assessment: &Assessment, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let report = TextReport::new(input, assessment);
            println!("{}", report);
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(input, assessment) {
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
                let _ = (input, assessment);
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(input: &InputRecord, assessment: &Assessment) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct ReportJson<'a> {
        input: &'a InputRecord,
        assessment: &'a Assessment,
    }

    serde_json::to_string_pretty(&ReportJson { input, assessment })
}
