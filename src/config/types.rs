//! Configuration file structure.

use serde::Deserialize;

use crate::models::{PublicHoliday, WorkSchedule};

/// The structure of `schedule.yaml`.
///
/// Holds the global [`WorkSchedule`] and the public-holiday calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// The global work schedule.
    pub schedule: WorkSchedule,
    /// The public-holiday calendar.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}
