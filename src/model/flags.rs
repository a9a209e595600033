use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QcFlag {
    LowDishQc,
    LowClusterCallRate,
    SexCheckFail,
}

impl QcFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QcFlag::LowDishQc => "LOW_DISH_QC",
            QcFlag::LowClusterCallRate => "LOW_CLUSTER_CALL_RATE",
            QcFlag::SexCheckFail => "SEX_CHECK_FAIL",
        }
    }
}

pub fn flag_order() -> &'static [QcFlag] {
    &[
        QcFlag::LowDishQc,
        QcFlag::LowClusterCallRate,
        QcFlag::SexCheckFail,
    ]
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/flags.rs"]
mod tests;
