//! Employee and department models.
//!
//! This module defines the Employee and Department structs for
//! representing workers and their grouping in the attendance system.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A department, used purely as a grouping and filter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub id: u64,
    /// The department name.
    pub name: String,
}

/// Represents an employee tracked by the attendance system.
///
/// The id is the stable identifier assigned by the biometric terminal
/// enrolment, so it is a string rather than a numeric key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (terminal user id).
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The department this employee belongs to, if any.
    pub department_id: Option<u64>,
    /// Guests are excluded from all statistics and payroll.
    #[serde(default)]
    pub is_guest: bool,
    /// The date the employee joined; days before it are not counted.
    pub joining_date: Option<NaiveDate>,
    /// The employee's monthly salary.
    pub monthly_salary: Decimal,
    /// Fixed monthly allowance paid on top of the salary.
    #[serde(default)]
    pub fixed_allowance: Decimal,
    /// Per-employee override of the annual leave quota, if any.
    pub leave_quota_override: Option<u32>,
}

impl Employee {
    /// Returns the employee's effective annual leave quota.
    ///
    /// The per-employee override wins when present, otherwise the
    /// schedule-wide default applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Asha Rahman".to_string(),
    ///     department_id: None,
    ///     is_guest: false,
    ///     joining_date: None,
    ///     monthly_salary: Decimal::new(30_000, 0),
    ///     fixed_allowance: Decimal::ZERO,
    ///     leave_quota_override: None,
    /// };
    /// assert_eq!(employee.effective_quota(12), 12);
    ///
    /// employee.leave_quota_override = Some(20);
    /// assert_eq!(employee.effective_quota(12), 20);
    /// ```
    pub fn effective_quota(&self, default_quota: u32) -> u32 {
        self.leave_quota_override.unwrap_or(default_quota)
    }
}
