use anyhow::Context;
use clap::Parser;
use generator::incidents::{build_incident_set, GeneratorConfig};
use log::info;
use roadcore::export::ExportFormat;
use roadcore::filter::query::QueryBuilder;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the RoadWatch filter pipeline")]
struct Args {
    /// Run one offline filter pass over a generated dataset and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a filter scenario from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Number of synthetic incidents to generate
    #[arg(long, default_value_t = 250)]
    count: usize,
    /// PRNG seed so fixture sets replay consistently
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the generated dataset as JSON (endpoint response shape)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };

    let generator_config = GeneratorConfig {
        count: args.count,
        seed: args.seed,
        ..Default::default()
    };
    let records = build_incident_set(&generator_config)?;
    info!(
        "generated {} incidents (seed {})",
        records.len(),
        generator_config.seed
    );

    if let Some(path) = &args.out {
        let json = serde_json::to_string_pretty(&records).context("serializing dataset")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json).with_context(|| format!("writing dataset {}", path.display()))?;
        println!("Wrote {} incidents to {}", records.len(), path.display());
    }

    if args.offline {
        let runner = Runner::new(workflow_config.clone());
        let summary = runner.execute(&records);

        info!(
            "offline pass matched {}/{} incidents for query {}",
            summary.matched.len(),
            summary.total,
            summary.query_string
        );
        println!(
            "Offline pass -> matched {}/{} incidents, histogram {:?}, query {}",
            summary.matched.len(),
            summary.total,
            summary.severity_histogram,
            summary.query_string
        );

        let query = QueryBuilder::build(&workflow_config.to_filter_state());
        for format in [ExportFormat::Csv, ExportFormat::GeoJson] {
            println!(
                "Export {} -> {}",
                format.as_str(),
                roadcore::export::export_url("http://127.0.0.1:8000", format, &query)
            );
        }

        let report = format!(
            "matched={} total={} histogram={:?} query={}\n",
            summary.matched.len(),
            summary.total,
            summary.severity_histogram,
            summary.query_string
        );
        let report_path = PathBuf::from("tools/data/offline_filter.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    Ok(())
}
