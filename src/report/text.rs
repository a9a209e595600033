use crate::report::{Summary, format_ratio};

pub fn render_summary_text(summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("Accreditation Project Summary\n");
    out.push_str("=============================\n\n");

    out.push_str("1. Sample progress\n");
    out.push_str(&format!("Total samples: {}\n", summary.totals.samples));
    out.push_str(&format!("DNA extracted: {}\n", summary.totals.dna_extracted));
    out.push_str(&format!("Genotyped: {}\n", summary.totals.genotyped));
    out.push_str(&format!("Data returned: {}\n", summary.totals.data_returned));
    out.push_str(&format!("Failed: {}\n\n", summary.totals.failed));

    out.push_str("2. Collection targets\n");
    for c in &summary.cohorts {
        let target = match c.target {
            Some(t) => t.to_string(),
            None => "NA".to_string(),
        };
        out.push_str(&format!(
            "{}: {} collected, target {}, progress {}\n",
            c.cohort,
            c.samples,
            target,
            format_ratio(c.progress)
        ));
    }
    out.push('\n');

    out.push_str("3. Antigens collected\n");
    for a in &summary.antigens {
        out.push_str(&format!(
            "{}: {} positive, {} negative ({} tested)\n",
            a.antigen,
            a.positive,
            a.negative,
            a.total()
        ));
    }
    out.push('\n');

    out.push_str("4. Sample QC\n");
    out.push_str(&format!(
        "Flagged rows: {} (page {} of {}, page size {})\n",
        summary.qc.flagged_rows,
        summary.qc.page + 1,
        summary.qc.page_count.max(1),
        summary.qc.page_size
    ));

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
