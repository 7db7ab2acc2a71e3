//! Attendance report builders.
//!
//! Every report is a pure accumulation: walk the dates in scope, classify
//! each (employee, day) pair, tally the statuses, and keep the per-day
//! detail rows. Department filtering and guest exclusion happen on the
//! employee set before any classification, so guests never leak into
//! counts.

mod daily;
mod monthly;
mod page;
mod range;
mod weekly;

pub use daily::{DailyStatusRow, daily_report};
pub use monthly::{MonthlyDetail, MonthlyRow, employee_monthly_report, monthly_report};
pub use page::{Page, PageRequest};
pub use range::{RangeDetail, employee_range_report};
pub use weekly::{WeeklyRow, weekly_report};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::classify::{DayContext, DayStatus, LeaveAllocation, LeavePay, allocate_leave, classify_day, resolve_schedule};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AttendanceLogEntry, Employee};
use crate::store::AttendanceStore;

/// One classified calendar day for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayDetail {
    /// The calendar day.
    pub date: NaiveDate,
    /// Full weekday name, e.g. `"Monday"`.
    pub day_of_week: String,
    /// The classified status.
    pub status: DayStatus,
    /// Earliest punch, when any exists.
    pub in_time: Option<NaiveTime>,
    /// Latest punch, when any exists.
    pub out_time: Option<NaiveTime>,
    /// Minutes past the scheduled start, zero when within tolerance.
    pub late_minutes: i64,
    /// Minutes before the scheduled end, zero when within tolerance.
    pub early_minutes: i64,
}

/// Status counts accumulated over a set of classified days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTotals {
    /// Days with at least one punch, including off-day attendance.
    pub present: u32,
    /// Working days with no punch and no leave cover.
    pub absent: u32,
    /// Working days where the first punch exceeded the late tolerance.
    pub late: u32,
    /// Working days where the last punch undercut the early tolerance.
    pub early_leave: u32,
    /// Days covered by approved leave.
    pub leave: u32,
    /// Leave days funded by the annual quota.
    pub paid_leave: u32,
    /// Leave days beyond the quota or inherently unpaid.
    pub unpaid_leave: u32,
}

impl StatusTotals {
    /// Folds one classified day into the tally.
    pub fn record(&mut self, status: DayStatus) {
        match status {
            DayStatus::Present | DayStatus::PresentOnHoliday => self.present += 1,
            DayStatus::Late => {
                self.present += 1;
                self.late += 1;
            }
            DayStatus::EarlyLeave => {
                self.present += 1;
                self.early_leave += 1;
            }
            DayStatus::LateAndEarly => {
                self.present += 1;
                self.late += 1;
                self.early_leave += 1;
            }
            DayStatus::Absent => self.absent += 1,
            DayStatus::Leave(pay) => {
                self.leave += 1;
                match pay {
                    LeavePay::Paid => self.paid_leave += 1,
                    LeavePay::Unpaid => self.unpaid_leave += 1,
                }
            }
            DayStatus::Weekend | DayStatus::Holiday => {}
        }
    }

    /// Sums another tally into this one.
    pub fn merge(&mut self, other: &StatusTotals) {
        self.present += other.present;
        self.absent += other.absent;
        self.late += other.late;
        self.early_leave += other.early_leave;
        self.leave += other.leave;
        self.paid_leave += other.paid_leave;
        self.unpaid_leave += other.unpaid_leave;
    }
}

/// Builds the employee's leave allocation for a calendar year.
pub(crate) fn allocation_for(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    employee: &Employee,
    year: i32,
) -> LeaveAllocation {
    let quota = employee.effective_quota(config.schedule().default_annual_leave_quota);
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default();
    let leaves = store.find_approved_leaves(Some(&employee.id), year_start, year_end);
    allocate_leave(year, quota, &leaves)
}

/// Classifies one day for one employee and captures the detail row.
///
/// `logs` may span a wider range; only punches matching the employee and
/// date are considered.
pub(crate) fn observe_day(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    employee_id: &str,
    date: NaiveDate,
    logs: &[AttendanceLogEntry],
    allocation: &LeaveAllocation,
) -> EngineResult<DayDetail> {
    let schedule = resolve_schedule(store, employee_id, date, config.schedule())?;
    let punches: Vec<AttendanceLogEntry> = logs
        .iter()
        .filter(|l| l.employee_id == employee_id && l.date() == date)
        .cloned()
        .collect();

    let context = DayContext {
        date,
        punches: &punches,
        schedule: &schedule,
        is_holiday: config.is_holiday(date),
        on_leave: allocation.pay_for(date),
    };
    let observation = classify_day(&context);

    Ok(DayDetail {
        date,
        day_of_week: format!("{}", date.format("%A")),
        status: observation.status,
        in_time: observation.in_time,
        out_time: observation.out_time,
        late_minutes: observation.late_minutes,
        early_minutes: observation.early_minutes,
    })
}

/// First and last day of a month. The month must be in `1..=12`.
pub(crate) fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_record_compound_statuses() {
        let mut totals = StatusTotals::default();
        totals.record(DayStatus::Present);
        totals.record(DayStatus::LateAndEarly);
        totals.record(DayStatus::Leave(LeavePay::Paid));
        totals.record(DayStatus::Leave(LeavePay::Unpaid));
        totals.record(DayStatus::Weekend);
        totals.record(DayStatus::Absent);

        assert_eq!(totals.present, 2);
        assert_eq!(totals.late, 1);
        assert_eq!(totals.early_leave, 1);
        assert_eq!(totals.leave, 2);
        assert_eq!(totals.paid_leave, 1);
        assert_eq!(totals.unpaid_leave, 1);
        assert_eq!(totals.absent, 1);
    }

    #[test]
    fn test_month_bounds_handles_december_and_leap_february() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let (_, feb_end) = month_bounds(2024, 2).unwrap();
        assert_eq!(feb_end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        assert!(month_bounds(2024, 13).is_none());
    }
}
