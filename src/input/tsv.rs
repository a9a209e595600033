use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "input file not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[derive(Debug, Clone)]
pub struct TsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads a whole tab-separated table. Blank lines are skipped; cells are
/// trimmed. Rows may be ragged; consumers index through `cell`.
pub fn read_tsv(mut reader: Box<dyn BufRead>, what: &str) -> Result<TsvTable, InputError> {
    let mut buf = String::new();

    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(InputError::Parse(format!("{what} file is empty")));
    }
    let header = split_fields(buf.trim_end());
    if header.is_empty() {
        return Err(InputError::Parse(format!("{what} header is empty")));
    }

    let mut rows = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        let line = buf.trim_end();
        if line.is_empty() {
            continue;
        }
        rows.push(split_fields(line));
    }

    Ok(TsvTable { header, rows })
}

/// Cell lookup that treats short rows as padded with empty fields.
pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(|s| s.as_str()).unwrap_or("")
}

fn split_fields(line: &str) -> Vec<String> {
    line.split('\t').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tsv.rs"]
mod tests;
