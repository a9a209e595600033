use super::*;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::record::{QcMetrics, SampleRecord, SexCheck};
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage5_qc::{ViewParams, apply_view, build_qc_table};

fn derived(id: &str, cohort: &str, status: &str) -> DerivedRecord {
    DerivedRecord {
        record: SampleRecord {
            id: id.to_string(),
            cohort: cohort.to_string(),
            dna_extracted_date: Some("2019-01-05".to_string()),
            sent_for_genotype_date: None,
            best_array: None,
            submitted_sex: "Female".to_string(),
            inferred_sex: "Female".to_string(),
            metrics: QcMetrics {
                dqc: Some(0.5),
                ..QcMetrics::default()
            },
            failure_mode: None,
            raw_status: status.to_string(),
        },
        dna_extracted: true,
        genotyped: false,
        data_returned: false,
        failed: status == "Fail",
        sex_check: SexCheck::Pass,
        status: status.to_string(),
    }
}

fn fixture() -> (Vec<DerivedRecord>, Vec<CohortSummary>, Vec<AntigenTally>) {
    let derived = vec![derived("s1", "A", "Fail"), derived("s2", "A", "Pass")];
    let cohorts = vec![CohortSummary {
        cohort: "A".to_string(),
        samples: 2,
        dna_extracted: 2,
        genotyped: 0,
        data_returned: 0,
        failed: 1,
        target: Some(4),
        progress: Some(0.5),
    }];
    let antigens = vec![AntigenTally {
        antigen: "Spike".to_string(),
        positive: 34,
        negative: 66,
    }];
    (derived, cohorts, antigens)
}

#[test]
fn test_build_summary_totals() {
    let (derived, cohorts, antigens) = fixture();
    let thresholds = ThresholdProfile::default_v1();
    let table = build_qc_table(&derived, &thresholds);
    let page = apply_view(&table, &ViewParams::default_v1(&thresholds));
    let input = ReportInput {
        derived: &derived,
        cohorts: &cohorts,
        antigens: &antigens,
        qc_page: &page,
    };
    let summary = build_summary(&input);
    assert_eq!(summary.tool, "accredqc");
    assert_eq!(summary.totals.samples, 2);
    assert_eq!(summary.totals.dna_extracted, 2);
    assert_eq!(summary.totals.failed, 1);
    assert_eq!(summary.qc.flagged_rows, 1);
    assert_eq!(summary.cohorts[0].progress, Some(0.5));
}

#[test]
fn test_write_reports_emits_all_tables() {
    let (derived, cohorts, antigens) = fixture();
    let thresholds = ThresholdProfile::default_v1();
    let table = build_qc_table(&derived, &thresholds);
    let page = apply_view(&table, &ViewParams::default_v1(&thresholds));
    let input = ReportInput {
        derived: &derived,
        cohorts: &cohorts,
        antigens: &antigens,
        qc_page: &page,
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let out_dir = std::env::temp_dir().join(format!("accredqc-report-{nanos}"));

    write_reports(&input, &out_dir).unwrap();

    let samples = fs::read_to_string(out_dir.join("samples.tsv")).unwrap();
    assert!(samples.starts_with("ID\tcohort\t"));
    assert!(samples.contains("\tPass\n") || samples.contains("\tPass"));
    assert_eq!(samples.lines().count(), 3);

    let cohorts_tsv = fs::read_to_string(out_dir.join("cohorts.tsv")).unwrap();
    assert!(cohorts_tsv.contains("A\t2\t2\t0\t0\t1\t4\t0.5000"));

    let antigens_tsv = fs::read_to_string(out_dir.join("antigens.tsv")).unwrap();
    assert!(antigens_tsv.contains("Spike\t34\t66"));

    let qc = fs::read_to_string(out_dir.join("qc_flagged.tsv")).unwrap();
    // one flagged row: s1 carries the LOW_DISH_QC highlight
    assert_eq!(qc.lines().count(), 2);
    assert!(qc.contains("LOW_DISH_QC"));

    let json = fs::read_to_string(out_dir.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"], "accredqc");
    assert_eq!(value["totals"]["samples"], 2);
    assert_eq!(value["cohorts"][0]["target"], 4);

    let text = fs::read_to_string(out_dir.join("summary.txt")).unwrap();
    assert!(text.contains("Total samples: 2"));

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn test_missing_target_written_as_na() {
    let cohorts = vec![CohortSummary {
        cohort: "B".to_string(),
        samples: 1,
        dna_extracted: 0,
        genotyped: 0,
        data_returned: 0,
        failed: 0,
        target: None,
        progress: None,
    }];
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let out_dir = std::env::temp_dir().join(format!("accredqc-report-na-{nanos}"));
    fs::create_dir_all(&out_dir).unwrap();

    write_cohorts_tsv(&cohorts, &out_dir.join("cohorts.tsv")).unwrap();
    let tsv = fs::read_to_string(out_dir.join("cohorts.tsv")).unwrap();
    assert!(tsv.contains("B\t1\t0\t0\t0\t0\tNA\tNA"));

    let _ = fs::remove_dir_all(&out_dir);
}
