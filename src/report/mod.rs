pub mod text;

use serde::Serialize;

use crate::model::record::{AntigenTally, DerivedRecord};
use crate::pipeline::stage3_cohorts::CohortSummary;
use crate::pipeline::stage5_qc::QcPage;

/// Headline milestone totals over the whole snapshot. These are the numbers
/// the dashboard shows in its info cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub samples: u64,
    pub dna_extracted: u64,
    pub genotyped: u64,
    pub data_returned: u64,
    pub failed: u64,
}

pub fn totals(derived: &[DerivedRecord]) -> Totals {
    let mut t = Totals {
        samples: derived.len() as u64,
        dna_extracted: 0,
        genotyped: 0,
        data_returned: 0,
        failed: 0,
    };
    for d in derived {
        t.dna_extracted += u64::from(d.dna_extracted);
        t.genotyped += u64::from(d.genotyped);
        t.data_returned += u64::from(d.data_returned);
        t.failed += u64::from(d.failed);
    }
    t
}

#[derive(Debug, Clone, Serialize)]
pub struct CohortEntry {
    pub cohort: String,
    pub samples: u64,
    pub dna_extracted: u64,
    pub genotyped: u64,
    pub data_returned: u64,
    pub failed: u64,
    pub target: Option<u64>,
    pub progress: Option<f64>,
}

impl From<&CohortSummary> for CohortEntry {
    fn from(s: &CohortSummary) -> Self {
        Self {
            cohort: s.cohort.clone(),
            samples: s.samples,
            dna_extracted: s.dna_extracted,
            genotyped: s.genotyped,
            data_returned: s.data_returned,
            failed: s.failed,
            target: s.target,
            progress: s.progress,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QcViewMeta {
    pub flagged_rows: usize,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

impl From<&QcPage> for QcViewMeta {
    fn from(p: &QcPage) -> Self {
        Self {
            flagged_rows: p.total_rows,
            page: p.page,
            page_count: p.page_count,
            page_size: p.page_size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub tool: String,
    pub version: String,
    pub totals: Totals,
    pub cohorts: Vec<CohortEntry>,
    pub antigens: Vec<AntigenTally>,
    pub qc: QcViewMeta,
}

pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "NA".to_string(),
    }
}

pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
