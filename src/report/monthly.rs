use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::report::{
    DayDetail, Page, PageRequest, StatusTotals, allocation_for, month_bounds, observe_day,
};
use crate::store::{AttendanceStore, EmployeeFilter};

/// One employee's classified month, day by day.
///
/// The monthly builder is the authoritative classification: leave cover is
/// checked before punches, and paid/unpaid leave splits follow the annual
/// quota allocation for the month's year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyDetail {
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    /// One entry per calendar day of the month.
    pub days: Vec<DayDetail>,
    /// Tally across the month.
    pub totals: StatusTotals,
}

/// Summary row for the paged team-wide monthly report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRow {
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Tally across the month.
    pub totals: StatusTotals,
}

pub(crate) fn build_monthly_detail(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    employee: &Employee,
    year: i32,
    month: u32,
) -> EngineResult<MonthlyDetail> {
    let (start, end) = month_bounds(year, month).ok_or(EngineError::CalculationError {
        message: format!("invalid month {year}-{month:02}"),
    })?;

    let allocation = allocation_for(store, config, employee, year);
    let logs = store.find_logs(Some(&employee.id), start, end);

    let mut days = Vec::with_capacity(31);
    let mut totals = StatusTotals::default();
    let mut date = start;
    while date <= end {
        let detail = observe_day(store, config, &employee.id, date, &logs, &allocation)?;
        totals.record(detail.status);
        days.push(detail);
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(MonthlyDetail {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        year,
        month,
        days,
        totals,
    })
}

/// Full day-by-day month for one employee.
pub fn employee_monthly_report(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<MonthlyDetail> {
    let employee = store
        .find_employee(employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;
    build_monthly_detail(store, config, &employee, year, month)
}

/// Monthly tallies for every in-scope employee, paged.
pub fn monthly_report(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    year: i32,
    month: u32,
    department_id: Option<u64>,
    page: &PageRequest,
) -> EngineResult<Page<MonthlyRow>> {
    let employees = store.find_employees(&EmployeeFilter {
        department_id,
        exclude_guests: true,
    });
    let total = employees.len();
    let (start, end) = page.slice_bounds(total);

    let mut rows = Vec::with_capacity(end - start);
    for employee in &employees[start..end] {
        let detail = build_monthly_detail(store, config, employee, year, month)?;
        rows.push(MonthlyRow {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            totals: detail.totals,
        });
    }

    Ok(Page::new(rows, page, total))
}
