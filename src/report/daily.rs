use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::classify::DayStatus;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::report::{Page, PageRequest, allocation_for, observe_day};
use crate::store::{AttendanceStore, EmployeeFilter};

/// One employee's classified status on a single date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStatusRow {
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// The reported date.
    pub date: NaiveDate,
    /// Classified status for the date.
    pub status: DayStatus,
    /// Earliest punch, when any exists.
    pub in_time: Option<NaiveTime>,
    /// Latest punch, when any exists.
    pub out_time: Option<NaiveTime>,
    /// Minutes past the scheduled start.
    pub late_minutes: i64,
    /// Minutes before the scheduled end.
    pub early_minutes: i64,
}

/// Classifies every in-scope employee for one date.
///
/// Pagination slices the employee set before classification, so only the
/// requested page is computed.
pub fn daily_report(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    date: NaiveDate,
    department_id: Option<u64>,
    page: &PageRequest,
) -> EngineResult<Page<DailyStatusRow>> {
    let employees = store.find_employees(&EmployeeFilter {
        department_id,
        exclude_guests: true,
    });
    let total = employees.len();
    let (start, end) = page.slice_bounds(total);

    let logs = store.find_logs(None, date, date);

    let mut rows = Vec::with_capacity(end - start);
    for employee in &employees[start..end] {
        let allocation = allocation_for(store, config, employee, date.year());
        let detail = observe_day(store, config, &employee.id, date, &logs, &allocation)?;
        rows.push(DailyStatusRow {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            date,
            status: detail.status,
            in_time: detail.in_time,
            out_time: detail.out_time,
            late_minutes: detail.late_minutes,
            early_minutes: detail.early_minutes,
        });
    }

    Ok(Page::new(rows, page, total))
}
