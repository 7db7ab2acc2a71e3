//! Request types for the attendance engine API.
//!
//! Query parameters for the report endpoints and the JSON body for the
//! payroll run endpoint.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::report::PageRequest;

fn default_per_page() -> usize {
    20
}

/// Query parameters for `GET /reports/daily`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyReportQuery {
    /// The date to classify.
    pub date: NaiveDate,
    /// Restrict to one department.
    pub department_id: Option<u64>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

/// Query parameters for `GET /reports/weekly`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyReportQuery {
    /// First day of the week to classify.
    pub week_start: NaiveDate,
    /// Restrict to one department.
    pub department_id: Option<u64>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

/// Query parameters for `GET /reports/monthly`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyReportQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    /// Restrict to one department.
    pub department_id: Option<u64>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

/// Query parameters for `GET /reports/employees/{id}/monthly`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeMonthQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
}

/// Query parameters for `GET /reports/employees/{id}/range`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRangeQuery {
    /// Inclusive range start.
    pub start_date: NaiveDate,
    /// Inclusive range end.
    pub end_date: NaiveDate,
}

/// JSON body for `POST /payroll/run`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollRunRequest {
    /// Target month as `"YYYY-MM"`.
    pub month: String,
}

impl PayrollRunRequest {
    /// Parses the month string into `(year, month)`.
    pub fn parse_month(&self) -> Option<(i32, u32)> {
        let (year, month) = self.month.split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if (1..=12).contains(&month) {
            Some((year, month))
        } else {
            None
        }
    }
}

/// Builds the shared page selector from query fields.
pub(super) fn page_request(page: usize, per_page: usize) -> PageRequest {
    PageRequest { page, per_page }
}
