pub mod stage1_derive;
pub mod stage2_sexcheck;
pub mod stage3_cohorts;
pub mod stage4_antigens;
pub mod stage5_qc;
pub mod stage6_report;

use crate::input::Snapshot;
use crate::model::record::DerivedRecord;

/// Runs the per-record stages over a snapshot. Pure and deterministic:
/// deriving twice from the same snapshot yields identical tables, so callers
/// may cache the result per snapshot.
pub fn derive_records(snapshot: &Snapshot) -> Vec<DerivedRecord> {
    let milestones = stage1_derive::run_stage1(&snapshot.records);
    stage2_sexcheck::run_stage2(&snapshot.records, &milestones)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
