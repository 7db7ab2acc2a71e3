//! Configuration loading functionality.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{PublicHoliday, WorkSchedule};

use super::types::ScheduleConfig;

/// Loads and provides access to the schedule configuration.
///
/// Reads `schedule.yaml` and exposes the global work schedule and the
/// public-holiday calendar. A missing file is recovered by materializing
/// the default schedule with an empty holiday calendar; a present but
/// unparsable file is a hard error.
///
/// # File structure
///
/// ```text
/// schedule:
///   start_time: "09:00:00"
///   end_time: "18:00:00"
///   late_tolerance_minutes: 15
///   early_leave_tolerance_minutes: 15
///   weekend_days: [6, 7]
///   default_annual_leave_quota: 12
///   late_penalty_threshold: 3
///   late_penalty_deduction: "0.5"
///   daily_rate_basis: STANDARD_30
///   daily_rate_fixed_value: 30
/// holidays:
///   - date: 2024-12-16
///     name: Victory Day
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schedule.yaml").unwrap();
/// println!("Work day starts at {}", loader.schedule().start_time);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: WorkSchedule,
    holidays: Vec<PublicHoliday>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            schedule: WorkSchedule::default(),
            holidays: Vec::new(),
        }
    }
}

impl ConfigLoader {
    /// Loads configuration from the given YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g. "./config/schedule.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success. A missing file falls back to
    /// the default schedule; invalid YAML returns `ConfigParseError`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            // Recovery: no config means the stock 9-to-6 schedule.
            Err(_) => return Ok(Self::default()),
        };

        let config: ScheduleConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self {
            schedule: config.schedule,
            holidays: config.holidays,
        })
    }

    /// Creates a loader from already-materialized parts.
    ///
    /// Used by tests and callers that source the schedule elsewhere.
    pub fn from_parts(schedule: WorkSchedule, holidays: Vec<PublicHoliday>) -> Self {
        Self { schedule, holidays }
    }

    /// Returns the global work schedule.
    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    /// Returns the public-holiday calendar.
    pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }

    /// Returns true if `date` is a public holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    #[test]
    fn test_missing_file_materializes_default_schedule() {
        let loader = ConfigLoader::load("/nonexistent/schedule.yaml").unwrap();
        assert_eq!(
            loader.schedule().start_time,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(loader.schedule().default_annual_leave_quota, 12);
        assert!(loader.holidays().is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
schedule:
  start_time: "08:30:00"
  end_time: "17:30:00"
  late_tolerance_minutes: 10
  early_leave_tolerance_minutes: 5
  weekend_days: [5, 6]
  default_annual_leave_quota: 15
  late_penalty_threshold: 4
  late_penalty_deduction: "0.25"
  daily_rate_basis: ACTUAL_WORKING_DAYS
  daily_rate_fixed_value: 26
holidays:
  - date: 2024-12-16
    name: Victory Day
  - date: 2024-03-26
    name: Independence Day
"#;
        let config: ScheduleConfig = serde_yaml::from_str(yaml).unwrap();
        let loader = ConfigLoader::from_parts(config.schedule, config.holidays);

        assert_eq!(
            loader.schedule().start_time,
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(loader.schedule().late_penalty_deduction, Decimal::new(25, 2));
        assert!(loader.is_holiday(NaiveDate::from_ymd_opt(2024, 12, 16).unwrap()));
        assert!(!loader.is_holiday(NaiveDate::from_ymd_opt(2024, 12, 17).unwrap()));
    }

    #[test]
    fn test_holidays_section_is_optional() {
        let yaml = r#"
schedule:
  start_time: "09:00:00"
  end_time: "18:00:00"
  late_tolerance_minutes: 15
  early_leave_tolerance_minutes: 15
  weekend_days: [6, 7]
  default_annual_leave_quota: 12
  late_penalty_threshold: 3
  late_penalty_deduction: "0.5"
  daily_rate_basis: STANDARD_30
  daily_rate_fixed_value: 30
"#;
        let config: ScheduleConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.holidays.is_empty());
    }
}
