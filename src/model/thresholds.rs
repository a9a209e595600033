/// Fixed QC thresholds and view defaults. Kept as a profile struct so a
/// future accreditation round can ship revised cutoffs next to v1.
#[derive(Debug, Clone)]
pub struct ThresholdProfile {
    /// dish QC below this value is flagged
    pub dqc_min: f64,
    /// cluster call rate (percent) below this value is flagged
    pub cluster_cr_min: f64,
    pub page_size: usize,
}

impl ThresholdProfile {
    pub fn default_v1() -> Self {
        Self {
            dqc_min: 0.82,
            cluster_cr_min: 97.0,
            page_size: 30,
        }
    }
}
