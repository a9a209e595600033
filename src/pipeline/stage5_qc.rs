use std::cmp::Ordering;
use std::str::FromStr;

use crate::model::flags::{QcFlag, flag_order};
use crate::model::record::{DerivedRecord, FAIL_STATUS, SexCheck};
use crate::model::thresholds::ThresholdProfile;

/// Per-cell highlight booleans. Each threshold is evaluated independently,
/// so one row can light up several cells at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellHighlights {
    pub dqc: bool,
    pub cluster_cr: bool,
    pub sex_check: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QcRow {
    pub id: String,
    pub cohort: String,
    pub pico_green: Option<f64>,
    pub cv_pct: Option<f64>,
    pub het_rate: Option<f64>,
    pub dqc: Option<f64>,
    pub cluster_cr: Option<f64>,
    pub sex_check: SexCheck,
    pub status: String,
    pub failure_mode: Option<String>,
    pub highlights: CellHighlights,
}

impl QcRow {
    pub fn flags(&self) -> Vec<QcFlag> {
        flag_order()
            .iter()
            .copied()
            .filter(|flag| match flag {
                QcFlag::LowDishQc => self.highlights.dqc,
                QcFlag::LowClusterCallRate => self.highlights.cluster_cr,
                QcFlag::SexCheckFail => self.highlights.sex_check,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QcTable {
    pub rows: Vec<QcRow>,
}

pub fn build_qc_table(derived: &[DerivedRecord], thresholds: &ThresholdProfile) -> QcTable {
    let rows = derived
        .iter()
        .map(|d| {
            let m = &d.record.metrics;
            // Absent metrics are fail-open: no value, no flag.
            let highlights = CellHighlights {
                dqc: m.dqc.is_some_and(|v| v < thresholds.dqc_min),
                cluster_cr: m.cluster_cr.is_some_and(|v| v < thresholds.cluster_cr_min),
                sex_check: d.sex_check == SexCheck::Fail,
            };
            QcRow {
                id: d.record.id.clone(),
                cohort: d.record.cohort.clone(),
                pico_green: m.pico_green,
                cv_pct: m.cv_pct,
                het_rate: m.het_rate,
                dqc: m.dqc,
                cluster_cr: m.cluster_cr,
                sex_check: d.sex_check,
                status: d.status.clone(),
                failure_mode: d.record.failure_mode.clone(),
                highlights,
            }
        })
        .collect();
    QcTable { rows }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Cohort,
    PicoGreen,
    CvPct,
    HetRate,
    Dqc,
    ClusterCr,
    SexCheck,
    Status,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "cohort" => Ok(SortKey::Cohort),
            "pico_green" => Ok(SortKey::PicoGreen),
            "cv" => Ok(SortKey::CvPct),
            "het_rate" => Ok(SortKey::HetRate),
            "dqc" => Ok(SortKey::Dqc),
            "cluster_cr" => Ok(SortKey::ClusterCr),
            "sex_check" => Ok(SortKey::SexCheck),
            "status" => Ok(SortKey::Status),
            other => Err(format!(
                "unknown sort column {other:?} (use id|cohort|pico_green|cv|het_rate|dqc|cluster_cr|sex_check|status)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct ViewParams {
    /// Default filter: only rows whose final status is Fail.
    pub failed_only: bool,
    pub sort: Option<SortKey>,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl ViewParams {
    pub fn default_v1(thresholds: &ThresholdProfile) -> Self {
        Self {
            failed_only: true,
            sort: None,
            order: SortOrder::Ascending,
            page: 0,
            page_size: thresholds.page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QcPage {
    pub rows: Vec<QcRow>,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Row count after filtering, before pagination.
    pub total_rows: usize,
}

/// Filter, sort, and paginate the QC table. Pure over the table: repeated
/// invocations with the same parameters return the same page.
pub fn apply_view(table: &QcTable, params: &ViewParams) -> QcPage {
    let mut rows: Vec<QcRow> = table
        .rows
        .iter()
        .filter(|r| !params.failed_only || r.status == FAIL_STATUS)
        .cloned()
        .collect();

    if let Some(key) = params.sort {
        // Stable sort; ties keep their filtered order. Absent metric values
        // sort after present ones in either direction.
        rows.sort_by(|a, b| cmp_rows(a, b, key, params.order));
    }

    let total_rows = rows.len();
    let page_size = params.page_size.max(1);
    let page_count = total_rows.div_ceil(page_size);
    let start = params.page.saturating_mul(page_size);
    let rows = if start >= total_rows {
        Vec::new()
    } else {
        rows[start..(start + page_size).min(total_rows)].to_vec()
    };

    QcPage {
        rows,
        page: params.page,
        page_count,
        page_size,
        total_rows,
    }
}

fn cmp_rows(a: &QcRow, b: &QcRow, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        SortKey::Id => cmp_str(&a.id, &b.id, order),
        SortKey::Cohort => cmp_str(&a.cohort, &b.cohort, order),
        SortKey::PicoGreen => cmp_metric(a.pico_green, b.pico_green, order),
        SortKey::CvPct => cmp_metric(a.cv_pct, b.cv_pct, order),
        SortKey::HetRate => cmp_metric(a.het_rate, b.het_rate, order),
        SortKey::Dqc => cmp_metric(a.dqc, b.dqc, order),
        SortKey::ClusterCr => cmp_metric(a.cluster_cr, b.cluster_cr, order),
        SortKey::SexCheck => cmp_str(a.sex_check.as_str(), b.sex_check.as_str(), order),
        SortKey::Status => cmp_str(&a.status, &b.status, order),
    }
}

fn cmp_str(a: &str, b: &str, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => a.cmp(b),
        SortOrder::Descending => b.cmp(a),
    }
}

fn cmp_metric(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let cmp = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_qc.rs"]
mod tests;
