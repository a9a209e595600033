use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::record::{AntigenTally, DerivedRecord};
use crate::pipeline::stage3_cohorts::CohortSummary;
use crate::pipeline::stage5_qc::{QcPage, QcRow};
use crate::report::text::render_summary_text;
use crate::report::{Summary, format_metric, format_ratio, totals};

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub derived: &'a [DerivedRecord],
    pub cohorts: &'a [CohortSummary],
    pub antigens: &'a [AntigenTally],
    pub qc_page: &'a QcPage,
}

pub fn write_reports(input: &ReportInput<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_samples_tsv(input.derived, &out_dir.join("samples.tsv"))?;
    write_cohorts_tsv(input.cohorts, &out_dir.join("cohorts.tsv"))?;
    write_antigens_tsv(input.antigens, &out_dir.join("antigens.tsv"))?;
    write_qc_tsv(input.qc_page, &out_dir.join("qc_flagged.tsv"))?;

    let summary = build_summary(input);
    let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    write_text(&out_dir.join("summary.json"), &json)?;
    write_text(&out_dir.join("summary.txt"), &render_summary_text(&summary))?;

    Ok(())
}

pub fn build_summary(input: &ReportInput<'_>) -> Summary {
    Summary {
        tool: "accredqc".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        totals: totals(input.derived),
        cohorts: input.cohorts.iter().map(Into::into).collect(),
        antigens: input.antigens.to_vec(),
        qc: input.qc_page.into(),
    }
}

fn write_samples_tsv(derived: &[DerivedRecord], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "ID\tcohort\tdate_dna_extracted\tdate_sent_for_genotype\tbest_array\t\
         Submitted_sex\tInferred_sex\tpico_green\tCV%\thet_rate\tdQC\tCluster_CR\t\
         Failure_Mode\tdna_extracted\tgenotyped\tdata_returned\tfailed\tsex_check\tsample_status"
    )?;
    for d in derived {
        let r = &d.record;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.id,
            r.cohort,
            opt_str(&r.dna_extracted_date),
            opt_str(&r.sent_for_genotype_date),
            opt_str(&r.best_array),
            r.submitted_sex,
            r.inferred_sex,
            format_metric(r.metrics.pico_green),
            format_metric(r.metrics.cv_pct),
            format_metric(r.metrics.het_rate),
            format_metric(r.metrics.dqc),
            format_metric(r.metrics.cluster_cr),
            opt_str(&r.failure_mode),
            flag01(d.dna_extracted),
            flag01(d.genotyped),
            flag01(d.data_returned),
            flag01(d.failed),
            d.sex_check.as_str(),
            d.status,
        )?;
    }
    w.flush()
}

fn write_cohorts_tsv(cohorts: &[CohortSummary], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "cohort\tsamples\tdna_extracted\tgenotyped\tdata_returned\tfailed\ttarget\tprogress"
    )?;
    for c in cohorts {
        let target = match c.target {
            Some(t) => t.to_string(),
            None => "NA".to_string(),
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            c.cohort,
            c.samples,
            c.dna_extracted,
            c.genotyped,
            c.data_returned,
            c.failed,
            target,
            format_ratio(c.progress),
        )?;
    }
    w.flush()
}

fn write_antigens_tsv(antigens: &[AntigenTally], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "antigen\tpositive\tnegative")?;
    for a in antigens {
        writeln!(w, "{}\t{}\t{}", a.antigen, a.positive, a.negative)?;
    }
    w.flush()
}

fn write_qc_tsv(page: &QcPage, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "ID\tcohort\tpico_green\tCV%\thet_rate\tdQC\tCluster_CR\tsex_check\tsample_status\t\
         Failure_Mode\tflags\tdqc_flagged\tcluster_cr_flagged\tsex_check_flagged"
    )?;
    for row in &page.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.cohort,
            format_metric(row.pico_green),
            format_metric(row.cv_pct),
            format_metric(row.het_rate),
            format_metric(row.dqc),
            format_metric(row.cluster_cr),
            row.sex_check.as_str(),
            row.status,
            opt_str(&row.failure_mode),
            format_flags(row),
            flag01(row.highlights.dqc),
            flag01(row.highlights.cluster_cr),
            flag01(row.highlights.sex_check),
        )?;
    }
    w.flush()
}

fn format_flags(row: &QcRow) -> String {
    let flags = row.flags();
    if flags.is_empty() {
        return "-".to_string();
    }
    flags
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn flag01(value: bool) -> u8 {
    u8::from(value)
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
