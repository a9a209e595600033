use crate::model::record::{DerivedRecord, FAIL_STATUS, SampleRecord, SexCheck};
use crate::pipeline::stage1_derive::Milestones;

const ACCEPTED_SEXES: &[&str] = &["Male", "Female"];

/// Submitted vs inferred sex. Values outside the accepted vocabulary yield
/// Unknown rather than Fail so the distinction stays visible downstream.
pub fn check_sex(submitted: &str, inferred: &str) -> SexCheck {
    let known = |v: &str| ACCEPTED_SEXES.iter().any(|&a| a == v);
    if !known(submitted) || !known(inferred) {
        return SexCheck::Unknown;
    }
    if submitted == inferred {
        SexCheck::Pass
    } else {
        SexCheck::Fail
    }
}

// Anything but a concordance Pass overrides the status to Fail. Unknown is
// deliberately conflated with Fail here; see DESIGN.md before changing.
pub fn final_status(raw_status: &str, sex_check: SexCheck) -> String {
    if sex_check != SexCheck::Pass {
        FAIL_STATUS.to_string()
    } else {
        raw_status.to_string()
    }
}

pub fn run_stage2(records: &[SampleRecord], milestones: &[Milestones]) -> Vec<DerivedRecord> {
    records
        .iter()
        .zip(milestones)
        .map(|(record, m)| {
            let sex_check = check_sex(&record.submitted_sex, &record.inferred_sex);
            let status = final_status(&record.raw_status, sex_check);
            DerivedRecord {
                record: record.clone(),
                dna_extracted: m.dna_extracted,
                genotyped: m.genotyped,
                data_returned: m.data_returned,
                failed: m.failed,
                sex_check,
                status,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_sexcheck.rs"]
mod tests;
