use std::path::Path;

use thiserror::Error;
use tracing::info;

pub mod antigens;
pub mod records;
pub mod targets;
pub mod tsv;

use crate::model::record::{AntigenMatrix, CohortTarget, SampleRecord};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("missing required columns: {0}")]
    MissingColumns(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Everything the pipeline consumes, loaded once and never mutated. Loading
/// again is the refresh operation; a snapshot itself is never updated in
/// place.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<SampleRecord>,
    pub targets: Vec<CohortTarget>,
    pub antigens: AntigenMatrix,
}

pub fn load_snapshot(
    records_path: &Path,
    targets_path: &Path,
    antigens_path: &Path,
) -> Result<Snapshot, InputError> {
    info!(
        "loading snapshot: records={}, targets={}, antigens={}",
        records_path.display(),
        targets_path.display(),
        antigens_path.display()
    );

    let records = records::load_records(records_path)?;
    let targets = targets::load_targets(targets_path)?;
    let antigens = antigens::load_antigens(antigens_path)?;

    info!(
        "snapshot loaded: {} sample records, {} cohort targets, {} antigens",
        records.len(),
        targets.len(),
        antigens.antigens.len()
    );

    Ok(Snapshot {
        records,
        targets,
        antigens,
    })
}
