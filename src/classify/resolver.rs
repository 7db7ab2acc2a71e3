//! Schedule resolution.
//!
//! Given an employee and a date, the resolver returns the effective
//! work-time window: the global default schedule, or a per-employee
//! override derived from an active shift assignment. Shifts only supply
//! the time window and tolerances; the weekend day-set, leave quota, and
//! payroll knobs always come from the global schedule.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Shift, WorkSchedule};
use crate::store::AttendanceStore;

/// Applies a shift's time window and tolerances on top of the global schedule.
///
/// Everything a shift does not define (weekend days, leave quota, late
/// penalty and daily-rate configuration) is carried over unchanged.
///
/// # Examples
///
/// ```
/// use attendance_engine::classify::apply_shift_override;
/// use attendance_engine::models::{Shift, WorkSchedule};
/// use chrono::NaiveTime;
///
/// let global = WorkSchedule::default();
/// let evening = Shift {
///     id: 1,
///     name: "Evening".to_string(),
///     start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     late_tolerance_minutes: 10,
///     early_leave_tolerance_minutes: 10,
/// };
///
/// let effective = apply_shift_override(&global, &evening);
/// assert_eq!(effective.start_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
/// assert_eq!(effective.weekend_days, global.weekend_days);
/// ```
pub fn apply_shift_override(global: &WorkSchedule, shift: &Shift) -> WorkSchedule {
    WorkSchedule {
        start_time: shift.start_time,
        end_time: shift.end_time,
        late_tolerance_minutes: shift.late_tolerance_minutes,
        early_leave_tolerance_minutes: shift.early_leave_tolerance_minutes,
        ..global.clone()
    }
}

/// Resolves the effective schedule for an employee on a date.
///
/// Looks up an active shift assignment overlapping `date`; when none is
/// found the global default is returned unchanged. Absence of a match is
/// a normal outcome, not an error.
pub fn resolve_schedule(
    store: &dyn AttendanceStore,
    employee_id: &str,
    date: NaiveDate,
    global: &WorkSchedule,
) -> EngineResult<WorkSchedule> {
    let Some(assignment) = store.find_active_shift_assignment(employee_id, date) else {
        return Ok(global.clone());
    };

    match store.find_shift(assignment.shift_id) {
        Some(shift) => Ok(apply_shift_override(global, &shift)),
        // Assignment pointing at a deleted shift: fall back to the default.
        None => Ok(global.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftAssignment;
    use crate::store::MemoryStore;
    use chrono::NaiveTime;

    fn evening_shift() -> Shift {
        Shift {
            id: 1,
            name: "Evening".to_string(),
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            late_tolerance_minutes: 10,
            early_leave_tolerance_minutes: 10,
        }
    }

    #[test]
    fn test_override_keeps_global_weekends_and_quota() {
        let global = WorkSchedule::default();
        let effective = apply_shift_override(&global, &evening_shift());

        assert_eq!(effective.start_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(effective.late_tolerance_minutes, 10);
        assert_eq!(effective.weekend_days, global.weekend_days);
        assert_eq!(
            effective.default_annual_leave_quota,
            global.default_annual_leave_quota
        );
        assert_eq!(effective.daily_rate_basis, global.daily_rate_basis);
    }

    #[test]
    fn test_resolve_falls_back_without_assignment() {
        let store = MemoryStore::new();
        let global = WorkSchedule::default();

        let effective = resolve_schedule(
            &store,
            "emp_001",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &global,
        )
        .unwrap();

        assert_eq!(effective, global);
    }

    #[test]
    fn test_resolve_applies_active_assignment() {
        let store = MemoryStore::new();
        store.insert_shift(evening_shift());
        store.insert_assignment(ShiftAssignment {
            id: 1,
            employee_id: "emp_001".to_string(),
            shift_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        });
        let global = WorkSchedule::default();

        let inside = resolve_schedule(
            &store,
            "emp_001",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &global,
        )
        .unwrap();
        assert_eq!(inside.start_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());

        let outside = resolve_schedule(
            &store,
            "emp_001",
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            &global,
        )
        .unwrap();
        assert_eq!(outside, global);
    }

    #[test]
    fn test_resolve_ignores_other_employees_assignments() {
        let store = MemoryStore::new();
        store.insert_shift(evening_shift());
        store.insert_assignment(ShiftAssignment {
            id: 1,
            employee_id: "emp_002".to_string(),
            shift_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        });
        let global = WorkSchedule::default();

        let effective = resolve_schedule(
            &store,
            "emp_001",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &global,
        )
        .unwrap();
        assert_eq!(effective, global);
    }
}
