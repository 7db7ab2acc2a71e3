//! Leave request model and status lifecycle.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a leave request.
///
/// `Pending` is the only transition source; `Approved` and `Rejected`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the interval counts as leave for classification.
    Approved,
    /// Rejected; the interval has no effect on classification.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "PENDING"),
            LeaveStatus::Approved => write!(f, "APPROVED"),
            LeaveStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// An employee's request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: u64,
    /// The requesting employee.
    pub employee_id: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text leave type label (e.g. "Sick", "Vacation", "UNPAID").
    pub leave_type: String,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// Reviewer comment, set when the request is decided.
    pub admin_comment: Option<String>,
    /// Who decided the request, if decided.
    pub reviewed_by: Option<String>,
    /// When the request was created.
    pub created_at: NaiveDateTime,
}

impl LeaveRequest {
    /// Returns true if the leave interval covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the leave type denotes inherently unpaid leave.
    ///
    /// `UNPAID` and `LWP` labels are compared case-insensitively; such
    /// leave never consumes the annual quota and is always unpaid.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{LeaveRequest, LeaveStatus};
    /// use chrono::{NaiveDate, NaiveDateTime};
    ///
    /// let mut request = LeaveRequest {
    ///     id: 1,
    ///     employee_id: "emp_001".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
    ///     leave_type: "lwp".to_string(),
    ///     status: LeaveStatus::Approved,
    ///     admin_comment: None,
    ///     reviewed_by: None,
    ///     created_at: NaiveDateTime::parse_from_str(
    ///         "2024-02-20 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// };
    /// assert!(request.is_inherently_unpaid());
    ///
    /// request.leave_type = "Sick".to_string();
    /// assert!(!request.is_inherently_unpaid());
    /// ```
    pub fn is_inherently_unpaid(&self) -> bool {
        let label = self.leave_type.to_uppercase();
        label == "UNPAID" || label == "LWP"
    }
}
