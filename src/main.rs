//! Command-line entry point for the monitoring service.
//!
//! Commands:
//!   status               load the store, derive alerts, print the summary (default)
//!   verify               check remote store, cache, and catalog health
//!   report [path]        write the HTML monitoring report
//!   export <what> <fmt> [path]   export measurements|alerts as csv|json
//!   import <file>        import a CSV or JSON measurement file
//!   seed-demo            seed the demonstration dataset into an empty store

use std::env;
use std::path::Path;
use std::process;

use chrono::Utc;

use ecomon_service::alert::{derive_all, filter_alerts, AlertFilter, Severity};
use ecomon_service::analysis::summary::{print_summary, summarize_at};
use ecomon_service::config::{self, Config};
use ecomon_service::demo;
use ecomon_service::export;
use ecomon_service::ingest;
use ecomon_service::logging::{self, LogLevel};
use ecomon_service::model::EcomonError;
use ecomon_service::standards::StandardsCatalog;
use ecomon_service::store::MeasurementStore;
use ecomon_service::verify;

fn main() {
    dotenv::dotenv().ok();

    let config = match config::load_config(Path::new(config::CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    logging::init_logger(LogLevel::Info, config.log_file.as_deref(), false);

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("status");

    let result = match command {
        "status" => cmd_status(&config),
        "verify" => {
            let report = verify::run_full_verification(&config, config::github_token());
            verify::print_summary(&report);
            Ok(())
        }
        "report" => cmd_report(&config, args.get(2).map(String::as_str)),
        "export" => cmd_export(&config, &args[2..]),
        "import" => cmd_import(&config, args.get(2).map(String::as_str)),
        "seed-demo" => cmd_seed(&config),
        other => {
            eprintln!("Unknown command: {}\n", other);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: ecomon_service [status|verify|report|export|import|seed-demo]");
    eprintln!("  status                        derive alerts and print the summary");
    eprintln!("  verify                        check remote store, cache, and catalog");
    eprintln!("  report [path]                 write the HTML monitoring report");
    eprintln!("  export <measurements|alerts> <csv|json> [path]");
    eprintln!("  import <file.csv|file.json>   import measurements through validation");
    eprintln!("  seed-demo                     seed demo data into an empty store");
}

fn open_store(config: &Config) -> MeasurementStore {
    MeasurementStore::open(config, config::github_token())
}

fn cmd_status(config: &Config) -> Result<(), EcomonError> {
    let store = open_store(config);
    let catalog = StandardsCatalog::builtin();

    let measurements = store.snapshot()?;
    let alerts = derive_all(&measurements, &catalog);
    let summary = summarize_at(&measurements, &alerts, Utc::now());
    print_summary(&summary);

    let critical = filter_alerts(
        &alerts,
        &AlertFilter {
            severity: Some(Severity::Critical),
            ..Default::default()
        },
    );
    if !critical.is_empty() {
        println!("\n⚠️  Critical alerts:");
        for a in &critical {
            println!(
                "   {} {} {} > {} ({}) at ({:.4}, {:.4})",
                a.parameter, a.value, a.unit, a.limit, a.source, a.latitude, a.longitude
            );
        }
    }
    Ok(())
}

fn cmd_report(config: &Config, path: Option<&str>) -> Result<(), EcomonError> {
    let store = open_store(config);
    let catalog = StandardsCatalog::builtin();
    let now = Utc::now();

    let measurements = store.snapshot()?;
    let alerts = derive_all(&measurements, &catalog);
    let html = export::html_report(&measurements, &alerts, &catalog, now);

    let path = path
        .map(str::to_string)
        .unwrap_or_else(|| export::dated_filename("monitoring_report", "html", now.date_naive()));
    export::write_export(Path::new(&path), &html)?;
    println!("✓ Report written to {}", path);
    Ok(())
}

fn cmd_export(config: &Config, args: &[String]) -> Result<(), EcomonError> {
    let usage = "usage: export <measurements|alerts> <csv|json> [path]";
    let what = args.first().map(String::as_str);
    let format = args.get(1).map(String::as_str);

    let store = open_store(config);
    let catalog = StandardsCatalog::builtin();
    let measurements = store.snapshot()?;
    let now = Utc::now();

    let (content, prefix, extension) = match (what, format) {
        (Some("measurements"), Some("csv")) => {
            (export::measurements_csv(&measurements), "measurements", "csv")
        }
        (Some("measurements"), Some("json")) => {
            (export::measurements_json(&measurements)?, "measurements", "json")
        }
        (Some("alerts"), Some("csv")) => {
            let alerts = derive_all(&measurements, &catalog);
            (export::alerts_csv(&alerts), "alerts", "csv")
        }
        (Some("alerts"), Some("json")) => {
            let alerts = derive_all(&measurements, &catalog);
            (export::alerts_json(&alerts)?, "alerts", "json")
        }
        _ => return Err(EcomonError::ParseError(usage.to_string())),
    };

    let path = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| export::dated_filename(prefix, extension, now.date_naive()));
    export::write_export(Path::new(&path), &content)?;
    println!("✓ Export written to {}", path);
    Ok(())
}

fn cmd_import(config: &Config, path: Option<&str>) -> Result<(), EcomonError> {
    let path = path.ok_or_else(|| {
        EcomonError::ParseError("usage: import <file.csv|file.json>".to_string())
    })?;

    let mut store = open_store(config);
    let outcome = ingest::import_file(&mut store, Path::new(path))?;

    println!(
        "✓ Imported {}/{} rows ({} rejected)",
        outcome.added,
        outcome.total,
        outcome.errors.len()
    );
    for (row, e) in &outcome.errors {
        println!("   row {}: {}", row, e);
    }
    Ok(())
}

fn cmd_seed(config: &Config) -> Result<(), EcomonError> {
    let mut store = open_store(config);
    let seeded = demo::seed_if_empty(&mut store)?;
    if seeded == 0 {
        println!("Store already holds measurements; nothing seeded.");
    } else {
        println!("✓ Seeded {} demonstration measurements", seeded);
    }
    Ok(())
}
