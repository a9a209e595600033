use std::path::Path;

use tracing::warn;

use crate::input::InputError;
use crate::input::tsv::{TsvTable, cell, open_maybe_gz, read_tsv};
use crate::model::record::CohortTarget;

pub const REQUIRED_COLUMNS: &[&str] = &["Partner", "Target"];

pub fn load_targets(path: &Path) -> Result<Vec<CohortTarget>, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = read_tsv(reader, "cohort targets")?;
    parse_targets(&table)
}

pub fn parse_targets(table: &TsvTable) -> Result<Vec<CohortTarget>, InputError> {
    let partner_col = table.header.iter().position(|h| h == "Partner");
    let target_col = table.header.iter().position(|h| h == "Target");
    let (partner_col, target_col) = match (partner_col, target_col) {
        (Some(p), Some(t)) => (p, t),
        (p, t) => {
            let mut missing = Vec::new();
            if p.is_none() {
                missing.push("Partner");
            }
            if t.is_none() {
                missing.push("Target");
            }
            return Err(InputError::MissingColumns(missing.join(", ")));
        }
    };

    let mut out: Vec<CohortTarget> = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let line_no = i + 2;
        let partner = cell(row, partner_col);
        if partner.is_empty() {
            warn!("target row has empty Partner; skipping (line {line_no})");
            continue;
        }
        if out.iter().any(|t| t.partner == partner) {
            warn!("duplicate target for partner {partner}; keeping first (line {line_no})");
            continue;
        }
        let raw_target = cell(row, target_col);
        let target = match raw_target.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                warn!(
                    "non-numeric Target {raw_target:?} for partner {partner}; skipping (line {line_no})"
                );
                continue;
            }
        };
        out.push(CohortTarget {
            partner: partner.to_string(),
            target,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/targets.rs"]
mod tests;
