use std::collections::HashMap;

use tracing::warn;

use crate::model::record::{CohortTarget, DerivedRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub cohort: String,
    pub samples: u64,
    pub dna_extracted: u64,
    pub genotyped: u64,
    pub data_returned: u64,
    pub failed: u64,
    /// None when the cohort has no row in the target table.
    pub target: Option<u64>,
    /// samples / target; None whenever the target is undefined or zero.
    pub progress: Option<f64>,
}

/// Groups derived records by cohort and joins collection targets by partner
/// name. Output order is first appearance in the record table, which keeps
/// the aggregation deterministic for a given snapshot.
pub fn run_stage3(derived: &[DerivedRecord], targets: &[CohortTarget]) -> Vec<CohortSummary> {
    let mut summaries: Vec<CohortSummary> = Vec::new();
    let mut index_by_cohort: HashMap<String, usize> = HashMap::new();

    for d in derived {
        let cohort = d.record.cohort.as_str();
        let idx = match index_by_cohort.get(cohort) {
            Some(&idx) => idx,
            None => {
                let idx = summaries.len();
                index_by_cohort.insert(cohort.to_string(), idx);
                summaries.push(CohortSummary {
                    cohort: cohort.to_string(),
                    samples: 0,
                    dna_extracted: 0,
                    genotyped: 0,
                    data_returned: 0,
                    failed: 0,
                    target: None,
                    progress: None,
                });
                idx
            }
        };
        let summary = &mut summaries[idx];
        summary.samples += 1;
        summary.dna_extracted += u64::from(d.dna_extracted);
        summary.genotyped += u64::from(d.genotyped);
        summary.data_returned += u64::from(d.data_returned);
        summary.failed += u64::from(d.failed);
    }

    let target_by_partner: HashMap<&str, u64> = targets
        .iter()
        .map(|t| (t.partner.as_str(), t.target))
        .collect();

    for summary in &mut summaries {
        if let Some(&target) = target_by_partner.get(summary.cohort.as_str()) {
            summary.target = Some(target);
            if target > 0 {
                summary.progress = Some(summary.samples as f64 / target as f64);
            } else {
                warn!("cohort {} has a zero target; progress undefined", summary.cohort);
            }
        }
    }

    for t in targets {
        if !index_by_cohort.contains_key(&t.partner) {
            warn!("target partner {} has no sample records", t.partner);
        }
    }

    summaries
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_cohorts.rs"]
mod tests;
