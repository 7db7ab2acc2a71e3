use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::report::{DayDetail, Page, PageRequest, StatusTotals, allocation_for, observe_day};
use crate::store::{AttendanceStore, EmployeeFilter};

/// One employee's classified week, day by day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyRow {
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// First day of the reported week.
    pub week_start: NaiveDate,
    /// Seven classified days starting at `week_start`.
    pub days: Vec<DayDetail>,
    /// Tally across the week.
    pub totals: StatusTotals,
}

/// Classifies every in-scope employee over the seven days starting at
/// `week_start`.
pub fn weekly_report(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    week_start: NaiveDate,
    department_id: Option<u64>,
    page: &PageRequest,
) -> EngineResult<Page<WeeklyRow>> {
    let employees = store.find_employees(&EmployeeFilter {
        department_id,
        exclude_guests: true,
    });
    let total = employees.len();
    let (start, end) = page.slice_bounds(total);

    let week_end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(week_start);
    let logs = store.find_logs(None, week_start, week_end);

    let mut rows = Vec::with_capacity(end - start);
    for employee in &employees[start..end] {
        // Leave quotas reset per calendar year; a week crossing December
        // into January needs an allocation for each side.
        let allocation = allocation_for(store, config, employee, week_start.year());
        let next_allocation = (week_end.year() != week_start.year())
            .then(|| allocation_for(store, config, employee, week_end.year()));
        let mut days = Vec::with_capacity(7);
        let mut totals = StatusTotals::default();

        let mut date = week_start;
        while date <= week_end {
            let day_allocation = match &next_allocation {
                Some(next) if date.year() == week_end.year() => next,
                _ => &allocation,
            };
            let detail = observe_day(store, config, &employee.id, date, &logs, day_allocation)?;
            totals.record(detail.status);
            days.push(detail);
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        rows.push(WeeklyRow {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            week_start,
            days,
            totals,
        });
    }

    Ok(Page::new(rows, page, total))
}
