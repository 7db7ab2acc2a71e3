//! Annual leave-quota allocation.
//!
//! The allocator is a pure function per (employee, year): it expands
//! every approved leave interval into individual days, sorts them, and
//! consumes one quota unit per day in date order until the quota runs
//! out. The same calendar day can therefore be PAID or UNPAID depending
//! only on how much quota earlier days in the year consumed, never on
//! which request it belonged to. Callers compute the allocation once per
//! employee-year and reuse it for every month they look at.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{LeaveRequest, LeaveStatus};

use super::status::LeavePay;

/// How a leave day entered the allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeaveKind {
    /// Ordinary leave; consumes quota while any remains.
    Ordinary,
    /// UNPAID/LWP-typed leave; never consumes quota.
    InherentlyUnpaid,
}

/// The PAID/UNPAID label for every leave day of one employee-year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveAllocation {
    year: i32,
    days: BTreeMap<NaiveDate, LeavePay>,
}

impl LeaveAllocation {
    /// The calendar year this allocation covers.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the pay label for `date`, or `None` if it is not a leave day.
    pub fn pay_for(&self, date: NaiveDate) -> Option<LeavePay> {
        self.days.get(&date).copied()
    }

    /// Total PAID leave days allocated for the year.
    pub fn paid_days(&self) -> u32 {
        self.days.values().filter(|p| **p == LeavePay::Paid).count() as u32
    }

    /// Total UNPAID leave days for the year.
    pub fn unpaid_days(&self) -> u32 {
        self.days
            .values()
            .filter(|p| **p == LeavePay::Unpaid)
            .count() as u32
    }

    /// Cumulative PAID leave days on dates strictly before `date`.
    pub fn paid_days_before(&self, date: NaiveDate) -> u32 {
        self.days
            .range(..date)
            .filter(|(_, p)| **p == LeavePay::Paid)
            .count() as u32
    }
}

/// Allocates the annual quota across an employee's approved leave days.
///
/// Intervals are clipped to the calendar year. Non-approved requests and
/// requests for other employees must be filtered by the caller; requests
/// with a non-matching status are ignored here as well.
///
/// # Examples
///
/// ```
/// use attendance_engine::classify::{allocate_leave, LeavePay};
/// use attendance_engine::models::{LeaveRequest, LeaveStatus};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let leave = LeaveRequest {
///     id: 1,
///     employee_id: "emp_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
///     leave_type: "Vacation".to_string(),
///     status: LeaveStatus::Approved,
///     admin_comment: None,
///     reviewed_by: None,
///     created_at: NaiveDateTime::parse_from_str(
///         "2024-05-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
///
/// let allocation = allocate_leave(2024, 2, &[leave]);
/// // Two days fit the quota, the third is unpaid.
/// assert_eq!(allocation.pay_for(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
///            Some(LeavePay::Paid));
/// assert_eq!(allocation.pay_for(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()),
///            Some(LeavePay::Unpaid));
/// ```
pub fn allocate_leave(year: i32, quota: u32, leaves: &[LeaveRequest]) -> LeaveAllocation {
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st exists");
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31st exists");

    // Expand intervals into days. When overlapping requests disagree on
    // the kind, ordinary leave wins so the day can still consume quota.
    let mut kinds: BTreeMap<NaiveDate, LeaveKind> = BTreeMap::new();
    for leave in leaves {
        if leave.status != LeaveStatus::Approved {
            continue;
        }
        let kind = if leave.is_inherently_unpaid() {
            LeaveKind::InherentlyUnpaid
        } else {
            LeaveKind::Ordinary
        };

        let mut date = leave.start_date.max(year_start);
        let last = leave.end_date.min(year_end);
        while date <= last {
            kinds
                .entry(date)
                .and_modify(|existing| {
                    if kind == LeaveKind::Ordinary {
                        *existing = LeaveKind::Ordinary;
                    }
                })
                .or_insert(kind);
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
    }

    // Consume quota in date order.
    let mut remaining = quota;
    let mut days = BTreeMap::new();
    for (date, kind) in kinds {
        let pay = match kind {
            LeaveKind::InherentlyUnpaid => LeavePay::Unpaid,
            LeaveKind::Ordinary if remaining > 0 => {
                remaining -= 1;
                LeavePay::Paid
            }
            LeaveKind::Ordinary => LeavePay::Unpaid,
        };
        days.insert(date, pay);
    }

    debug_assert!(days.keys().all(|d| d.year() == year));
    LeaveAllocation { year, days }
}
