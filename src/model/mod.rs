pub mod flags;
pub mod record;
pub mod thresholds;
