use crate::model::record::{AntigenMatrix, AntigenTally};

/// Transposes the sign-keyed wide matrix into one row per antigen. Pure
/// reshape: counts pass through untouched, column order is preserved, and
/// the loader already guarantees antigen names are unique.
pub fn run_stage4(matrix: &AntigenMatrix) -> Vec<AntigenTally> {
    matrix
        .antigens
        .iter()
        .enumerate()
        .map(|(i, antigen)| AntigenTally {
            antigen: antigen.clone(),
            positive: matrix.positive[i],
            negative: matrix.negative[i],
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_antigens.rs"]
mod tests;
