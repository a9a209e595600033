use crate::model::record::{FAIL_STATUS, SampleRecord};

/// Progress milestones derived from a single record. These are independent
/// booleans, not an ordered state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestones {
    pub dna_extracted: bool,
    pub genotyped: bool,
    pub data_returned: bool,
    pub failed: bool,
}

pub fn run_stage1(records: &[SampleRecord]) -> Vec<Milestones> {
    records.iter().map(derive_milestones).collect()
}

pub fn derive_milestones(record: &SampleRecord) -> Milestones {
    Milestones {
        dna_extracted: present(&record.dna_extracted_date),
        genotyped: present(&record.sent_for_genotype_date),
        data_returned: present(&record.best_array),
        failed: record.raw_status == FAIL_STATUS,
    }
}

// An absent or blank value means the sample has not reached the stage yet,
// never that the record is malformed.
fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_derive.rs"]
mod tests;
