use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::report::monthly::build_monthly_detail;
use crate::report::{MonthlyDetail, StatusTotals};
use crate::store::AttendanceStore;

/// Month-by-month attendance detail for one employee over a date range.
///
/// Each month that intersects the range contributes its full
/// [`MonthlyDetail`]; the range totals are the sum over those months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeDetail {
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Requested range start.
    pub start_date: NaiveDate,
    /// Requested range end.
    pub end_date: NaiveDate,
    /// Monthly details for every month touching the range, in order.
    pub months: Vec<MonthlyDetail>,
    /// Tally summed across the months.
    pub totals: StatusTotals,
}

/// Concatenates monthly reports across every month the range touches.
pub fn employee_range_report(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    employee_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> EngineResult<RangeDetail> {
    if start_date > end_date {
        return Err(EngineError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }
    let employee = store
        .find_employee(employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;

    let mut months = Vec::new();
    let mut totals = StatusTotals::default();

    let mut year = start_date.year();
    let mut month = start_date.month();
    let last = (end_date.year(), end_date.month());
    while (year, month) <= last {
        let detail = build_monthly_detail(store, config, &employee, year, month)?;
        totals.merge(&detail.totals);
        months.push(detail);

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    Ok(RangeDetail {
        employee_id: employee.id,
        employee_name: employee.name,
        start_date,
        end_date,
        months,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceLogEntry, Employee};
    use crate::store::MemoryStore;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn setup() -> (MemoryStore, ConfigLoader) {
        let store = MemoryStore::new();
        store.insert_employee(Employee {
            id: "emp_001".to_string(),
            name: "Employee emp_001".to_string(),
            department_id: None,
            is_guest: false,
            joining_date: None,
            monthly_salary: Decimal::new(30_000, 0),
            fixed_allowance: Decimal::ZERO,
            leave_quota_override: None,
        });
        (store, ConfigLoader::default())
    }

    fn punch(employee_id: &str, stamp: &str) -> AttendanceLogEntry {
        AttendanceLogEntry {
            employee_id: employee_id.to_string(),
            timestamp: NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap(),
            device_id: "gate-1".to_string(),
        }
    }

    #[test]
    fn test_range_spans_year_boundary_and_sums_totals() {
        let (store, config) = setup();
        store.insert_log(punch("emp_001", "2023-12-18 09:00:00"));
        store.insert_log(punch("emp_001", "2024-01-08 09:00:00"));

        let start = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let report = employee_range_report(&store, &config, "emp_001", start, end).unwrap();

        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].year, 2023);
        assert_eq!(report.months[0].month, 12);
        assert_eq!(report.months[1].year, 2024);
        assert_eq!(report.months[1].month, 1);
        assert_eq!(report.totals.present, 2);
        assert_eq!(
            report.totals.absent,
            report.months[0].totals.absent + report.months[1].totals.absent
        );
    }

    #[test]
    fn test_range_rejects_inverted_bounds_and_unknown_employee() {
        let (store, config) = setup();
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(matches!(
            employee_range_report(&store, &config, "emp_001", start, end),
            Err(EngineError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            employee_range_report(&store, &config, "emp_404", end, start),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }
}
