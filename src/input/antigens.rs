use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use crate::input::InputError;
use crate::input::tsv::{TsvTable, cell, open_maybe_gz, read_tsv};
use crate::model::record::{AntigenMatrix, Sign};

/// Loads the sign-keyed antigen count matrix. The first header column is the
/// sign key; every remaining column is an antigen name. Exactly one `+` row
/// and one `-` row are required.
pub fn load_antigens(path: &Path) -> Result<AntigenMatrix, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = read_tsv(reader, "antigen counts")?;
    parse_antigens(&table)
}

pub fn parse_antigens(table: &TsvTable) -> Result<AntigenMatrix, InputError> {
    if table.header.len() < 2 {
        return Err(InputError::InvalidInput(
            "antigen matrix has no antigen columns".to_string(),
        ));
    }
    let antigens: Vec<String> = table.header[1..].to_vec();

    let mut seen = HashSet::new();
    for name in &antigens {
        if name.is_empty() {
            return Err(InputError::InvalidInput(
                "antigen matrix has an empty antigen column name".to_string(),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(InputError::InvalidInput(format!(
                "duplicate antigen column: {name}"
            )));
        }
    }

    let mut positive: Option<Vec<u64>> = None;
    let mut negative: Option<Vec<u64>> = None;
    for (i, row) in table.rows.iter().enumerate() {
        let line_no = i + 2;
        let sign = match cell(row, 0) {
            "+" => Sign::Positive,
            "-" => Sign::Negative,
            other => {
                warn!("antigen matrix row has unknown sign key {other:?}; skipping (line {line_no})");
                continue;
            }
        };
        let counts = parse_counts(row, &antigens, line_no)?;
        let slot = match sign {
            Sign::Positive => &mut positive,
            Sign::Negative => &mut negative,
        };
        if slot.is_some() {
            return Err(InputError::InvalidInput(format!(
                "antigen matrix has more than one {} row",
                sign_label(sign)
            )));
        }
        *slot = Some(counts);
    }

    match (positive, negative) {
        (Some(positive), Some(negative)) => Ok(AntigenMatrix {
            antigens,
            positive,
            negative,
        }),
        (positive, _) => Err(InputError::InvalidInput(format!(
            "antigen matrix is missing its {} row",
            if positive.is_none() { "+" } else { "-" }
        ))),
    }
}

fn parse_counts(row: &[String], antigens: &[String], line_no: usize) -> Result<Vec<u64>, InputError> {
    let mut counts = Vec::with_capacity(antigens.len());
    for (col, antigen) in antigens.iter().enumerate() {
        let raw = cell(row, col + 1);
        let count = raw.parse::<u64>().map_err(|_| {
            InputError::Parse(format!(
                "invalid count {raw:?} for antigen {antigen} (line {line_no})"
            ))
        })?;
        counts.push(count);
    }
    Ok(counts)
}

fn sign_label(sign: Sign) -> &'static str {
    match sign {
        Sign::Positive => "+",
        Sign::Negative => "-",
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/antigens.rs"]
mod tests;
