//! Work schedule, shift, and shift assignment models.
//!
//! The global [`WorkSchedule`] defines the default work-time window,
//! tolerances, weekend day-set, leave quota, and payroll knobs. A
//! [`Shift`] is a named alternate time window; a [`ShiftAssignment`]
//! makes it the effective window for one employee over a date range.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selects the divisor used to derive the daily rate from the monthly salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DailyRateBasis {
    /// Divide by a flat 30 days.
    #[serde(rename = "STANDARD_30")]
    Standard30,
    /// Divide by the month's count of working days (not weekend/holiday).
    #[serde(rename = "ACTUAL_WORKING_DAYS")]
    ActualWorkingDays,
    /// Divide by a configured fixed day count.
    #[serde(rename = "FIXED_DAYS")]
    FixedDays,
}

/// The schedule-wide configuration for attendance and payroll.
///
/// A single instance applies to everyone; shift assignments may override
/// the time window and tolerances per employee, but the weekend day-set
/// and leave quota always come from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// Scheduled start of the work day.
    pub start_time: NaiveTime,
    /// Scheduled end of the work day.
    pub end_time: NaiveTime,
    /// Grace minutes after the start before a punch counts as late.
    pub late_tolerance_minutes: i64,
    /// Grace minutes before the end before a punch counts as early leave.
    pub early_leave_tolerance_minutes: i64,
    /// ISO weekday numbers (1 = Monday .. 7 = Sunday) that are weekend days.
    pub weekend_days: BTreeSet<u32>,
    /// Annual leave quota applied when an employee has no override.
    pub default_annual_leave_quota: u32,
    /// Number of late days that accrue one penalty unit.
    pub late_penalty_threshold: u32,
    /// Size of one penalty unit, as a fraction of a day's salary.
    pub late_penalty_deduction: Decimal,
    /// Which divisor to use when deriving the daily rate.
    pub daily_rate_basis: DailyRateBasis,
    /// The divisor used when `daily_rate_basis` is `FIXED_DAYS`.
    pub daily_rate_fixed_value: u32,
}

impl Default for WorkSchedule {
    /// The schedule materialized when no configuration is available:
    /// 09:00–18:00, 15-minute tolerances, Saturday/Sunday weekend,
    /// 12-day quota, one half-day penalty per 3 late days, flat-30 rate.
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
            late_tolerance_minutes: 15,
            early_leave_tolerance_minutes: 15,
            weekend_days: BTreeSet::from([6, 7]),
            default_annual_leave_quota: 12,
            late_penalty_threshold: 3,
            late_penalty_deduction: Decimal::new(5, 1),
            daily_rate_basis: DailyRateBasis::Standard30,
            daily_rate_fixed_value: 30,
        }
    }
}

impl WorkSchedule {
    /// Returns true if `date` falls on a configured weekend day.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::WorkSchedule;
    /// use chrono::NaiveDate;
    ///
    /// let schedule = WorkSchedule::default();
    /// // 2024-03-09 is a Saturday
    /// assert!(schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
    /// // 2024-03-11 is a Monday
    /// assert!(!schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
    /// ```
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days
            .contains(&date.weekday().number_from_monday())
    }

    /// The latest punch-in time that is not flagged as late.
    ///
    /// Lateness is measured against this tolerance-adjusted threshold,
    /// never against the raw start time.
    pub fn late_threshold(&self) -> NaiveTime {
        self.start_time + Duration::minutes(self.late_tolerance_minutes)
    }

    /// The earliest punch-out time that is not flagged as early leave.
    pub fn early_threshold(&self) -> NaiveTime {
        self.end_time - Duration::minutes(self.early_leave_tolerance_minutes)
    }
}

/// A named alternate work-time window with its own tolerances.
///
/// Shifts never redefine weekends or leave quotas; those always come
/// from the global [`WorkSchedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: u64,
    /// The shift name (e.g. "Evening").
    pub name: String,
    /// Scheduled start of the shift.
    pub start_time: NaiveTime,
    /// Scheduled end of the shift.
    pub end_time: NaiveTime,
    /// Grace minutes after the start before a punch counts as late.
    pub late_tolerance_minutes: i64,
    /// Grace minutes before the end before a punch counts as early leave.
    pub early_leave_tolerance_minutes: i64,
}

/// Assigns a shift to an employee over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Unique identifier for the assignment.
    pub id: u64,
    /// The assigned employee.
    pub employee_id: String,
    /// The assigned shift.
    pub shift_id: u64,
    /// First date the assignment is active (inclusive).
    pub start_date: NaiveDate,
    /// Last date the assignment is active (inclusive).
    pub end_date: NaiveDate,
}

impl ShiftAssignment {
    /// Returns true if the assignment is active on `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_values() {
        let schedule = WorkSchedule::default();
        assert_eq!(schedule.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(schedule.end_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(schedule.late_tolerance_minutes, 15);
        assert_eq!(schedule.default_annual_leave_quota, 12);
        assert_eq!(schedule.late_penalty_threshold, 3);
        assert_eq!(schedule.late_penalty_deduction, Decimal::new(5, 1));
        assert_eq!(schedule.daily_rate_basis, DailyRateBasis::Standard30);
    }

    #[test]
    fn test_weekend_detection_uses_iso_numbers() {
        let schedule = WorkSchedule::default();
        // 2024-03-08 Friday, 09 Saturday, 10 Sunday
        assert!(!schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()));
        assert!(schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
        assert!(schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
    }

    #[test]
    fn test_friday_saturday_weekend() {
        let mut schedule = WorkSchedule::default();
        schedule.weekend_days = BTreeSet::from([5, 6]);
        assert!(schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()));
        assert!(schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
        assert!(!schedule.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
    }

    #[test]
    fn test_thresholds_adjust_for_tolerance() {
        let schedule = WorkSchedule::default();
        assert_eq!(
            schedule.late_threshold(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap()
        );
        assert_eq!(
            schedule.early_threshold(),
            NaiveTime::from_hms_opt(17, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_assignment_contains_is_inclusive() {
        let assignment = ShiftAssignment {
            id: 1,
            employee_id: "emp_001".to_string(),
            shift_id: 2,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };
        assert!(assignment.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(assignment.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!assignment.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!assignment.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_daily_rate_basis_serialization() {
        assert_eq!(
            serde_json::to_string(&DailyRateBasis::Standard30).unwrap(),
            "\"STANDARD_30\""
        );
        assert_eq!(
            serde_json::to_string(&DailyRateBasis::ActualWorkingDays).unwrap(),
            "\"ACTUAL_WORKING_DAYS\""
        );
        assert_eq!(
            serde_json::to_string(&DailyRateBasis::FixedDays).unwrap(),
            "\"FIXED_DAYS\""
        );
    }

    #[test]
    fn test_schedule_serialization_round_trip() {
        let schedule = WorkSchedule::default();
        let json = serde_json::to_string(&schedule).unwrap();
        let deserialized: WorkSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, deserialized);
    }
}
