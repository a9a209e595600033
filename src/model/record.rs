use serde::Serialize;

/// Raw status value that marks a sample as failed. Exact, case-sensitive.
pub const FAIL_STATUS: &str = "Fail";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QcMetrics {
    pub pico_green: Option<f64>,
    pub cv_pct: Option<f64>,
    pub het_rate: Option<f64>,
    pub dqc: Option<f64>,
    pub cluster_cr: Option<f64>,
}

/// One sample row as loaded from the record table. Dates are kept as opaque
/// strings; the pipeline only ever tests presence, never parses calendars.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub id: String,
    pub cohort: String,
    pub dna_extracted_date: Option<String>,
    pub sent_for_genotype_date: Option<String>,
    pub best_array: Option<String>,
    pub submitted_sex: String,
    pub inferred_sex: String,
    pub metrics: QcMetrics,
    pub failure_mode: Option<String>,
    pub raw_status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SexCheck {
    Pass,
    Fail,
    Unknown,
}

impl SexCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            SexCheck::Pass => "Pass",
            SexCheck::Fail => "Fail",
            SexCheck::Unknown => "Unknown",
        }
    }
}

/// A sample record plus everything the pipeline attaches to it. `status` is
/// the final value with the sex-check override already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub record: SampleRecord,
    pub dna_extracted: bool,
    pub genotyped: bool,
    pub data_returned: bool,
    pub failed: bool,
    pub sex_check: SexCheck,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortTarget {
    pub partner: String,
    pub target: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// Wide antigen count matrix: one row per sign, one column per antigen.
/// Loader guarantees both sign rows are present, antigen names are unique,
/// and each row carries one count per antigen column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntigenMatrix {
    pub antigens: Vec<String>,
    pub positive: Vec<u64>,
    pub negative: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntigenTally {
    pub antigen: String,
    pub positive: u64,
    pub negative: u64,
}

impl AntigenTally {
    /// Number of samples tested for this antigen.
    pub fn total(&self) -> u64 {
        self.positive + self.negative
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/record.rs"]
mod tests;
