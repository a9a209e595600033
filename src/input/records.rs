use std::path::Path;

use tracing::warn;

use crate::input::InputError;
use crate::input::tsv::{TsvTable, cell, open_maybe_gz, read_tsv};
use crate::model::record::{QcMetrics, SampleRecord};

/// Column-name contract for the sample record table. Names match the lab
/// export verbatim, inconsistent capitalization included.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "ID",
    "cohort",
    "date_dna_extracted",
    "date_sent_for_genotype",
    "best_array",
    "Submitted_sex",
    "Inferred_sex",
    "pico_green",
    "CV%",
    "het_rate",
    "dQC",
    "Cluster_CR",
    "Failure_Mode",
    "sample_status",
];

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    id: usize,
    cohort: usize,
    date_dna_extracted: usize,
    date_sent_for_genotype: usize,
    best_array: usize,
    submitted_sex: usize,
    inferred_sex: usize,
    pico_green: usize,
    cv_pct: usize,
    het_rate: usize,
    dqc: usize,
    cluster_cr: usize,
    failure_mode: usize,
    sample_status: usize,
}

pub fn load_records(path: &Path) -> Result<Vec<SampleRecord>, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = read_tsv(reader, "sample records")?;
    parse_records(&table)
}

pub fn parse_records(table: &TsvTable) -> Result<Vec<SampleRecord>, InputError> {
    let columns = resolve_columns(&table.header)?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let line_no = i + 2;
        let id = cell(row, columns.id);
        if id.is_empty() {
            warn!("sample row has empty ID; skipping (line {line_no})");
            continue;
        }
        out.push(SampleRecord {
            id: id.to_string(),
            cohort: cell(row, columns.cohort).to_string(),
            dna_extracted_date: opt(cell(row, columns.date_dna_extracted)),
            sent_for_genotype_date: opt(cell(row, columns.date_sent_for_genotype)),
            best_array: opt(cell(row, columns.best_array)),
            submitted_sex: cell(row, columns.submitted_sex).to_string(),
            inferred_sex: cell(row, columns.inferred_sex).to_string(),
            metrics: QcMetrics {
                pico_green: metric(cell(row, columns.pico_green), "pico_green", id),
                cv_pct: metric(cell(row, columns.cv_pct), "CV%", id),
                het_rate: metric(cell(row, columns.het_rate), "het_rate", id),
                dqc: metric(cell(row, columns.dqc), "dQC", id),
                cluster_cr: metric(cell(row, columns.cluster_cr), "Cluster_CR", id),
            },
            failure_mode: opt(cell(row, columns.failure_mode)),
            raw_status: cell(row, columns.sample_status).to_string(),
        });
    }
    Ok(out)
}

fn resolve_columns(header: &[String]) -> Result<ColumnMap, InputError> {
    let find = |name: &str| header.iter().position(|h| h == name);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| find(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns(missing.join(", ")));
    }

    let idx = |name: &str| find(name).unwrap_or(usize::MAX);
    Ok(ColumnMap {
        id: idx("ID"),
        cohort: idx("cohort"),
        date_dna_extracted: idx("date_dna_extracted"),
        date_sent_for_genotype: idx("date_sent_for_genotype"),
        best_array: idx("best_array"),
        submitted_sex: idx("Submitted_sex"),
        inferred_sex: idx("Inferred_sex"),
        pico_green: idx("pico_green"),
        cv_pct: idx("CV%"),
        het_rate: idx("het_rate"),
        dqc: idx("dQC"),
        cluster_cr: idx("Cluster_CR"),
        failure_mode: idx("Failure_Mode"),
        sample_status: idx("sample_status"),
    })
}

fn opt(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// QC metrics are fail-open: a value that does not parse is carried as
// absent and never trips a threshold.
fn metric(value: &str, column: &str, id: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("non-numeric {column} value {value:?} for sample {id}; treating as absent");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/records.rs"]
mod tests;
