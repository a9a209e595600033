mod input;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::input::load_snapshot;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::derive_records;
use crate::pipeline::stage3_cohorts::run_stage3;
use crate::pipeline::stage4_antigens::run_stage4;
use crate::pipeline::stage5_qc::{SortKey, SortOrder, ViewParams, apply_view, build_qc_table};
use crate::pipeline::stage6_report::{ReportInput, write_reports};

#[derive(Debug, Parser)]
#[command(name = "accredqc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive progress and QC tables from a snapshot of lab records.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Sample record table (TSV, optionally gzipped)
    #[arg(long)]
    records: PathBuf,
    /// Cohort collection targets (TSV: Partner, Target)
    #[arg(long)]
    targets: PathBuf,
    /// Sign-keyed antigen count matrix (TSV)
    #[arg(long)]
    antigens: PathBuf,
    /// Output directory for report tables
    #[arg(long)]
    out: PathBuf,
    /// QC view page (zero-based)
    #[arg(long, default_value_t = 0)]
    page: usize,
    /// QC view page size
    #[arg(long)]
    page_size: Option<usize>,
    /// QC view sort column
    #[arg(long)]
    sort: Option<SortKey>,
    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,
    /// Include every sample in the QC view, not just final-status failures
    #[arg(long)]
    all: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;

    let snapshot = load_snapshot(&args.records, &args.targets, &args.antigens)
        .map_err(|e| e.to_string())?;

    let thresholds = ThresholdProfile::default_v1();

    let derived = derive_records(&snapshot);
    let cohorts = run_stage3(&derived, &snapshot.targets);
    let antigens = run_stage4(&snapshot.antigens);

    let qc_table = build_qc_table(&derived, &thresholds);
    let params = view_params(&args, &thresholds);
    let qc_page = apply_view(&qc_table, &params);

    let report = ReportInput {
        derived: &derived,
        cohorts: &cohorts,
        antigens: &antigens,
        qc_page: &qc_page,
    };
    write_reports(&report, &args.out).map_err(|e| e.to_string())?;

    Ok(())
}

fn view_params(args: &RunArgs, thresholds: &ThresholdProfile) -> ViewParams {
    let mut params = ViewParams::default_v1(thresholds);
    params.failed_only = !args.all;
    params.sort = args.sort;
    if args.desc {
        params.order = SortOrder::Descending;
    }
    params.page = args.page;
    if let Some(size) = args.page_size {
        params.page_size = size.max(1);
    }
    params
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
