//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during classification, reporting,
//! and payroll generation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee id was referenced by an operation that requires it.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// A shift id was referenced by an operation that requires it.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id that was not found.
        shift_id: u64,
    },

    /// A leave request id was referenced by an operation that requires it.
    #[error("Leave request not found: {request_id}")]
    LeaveRequestNotFound {
        /// The leave request id that was not found.
        request_id: u64,
    },

    /// A payslip id was referenced by an operation that requires it.
    #[error("Payslip not found: {payslip_id}")]
    PayslipNotFound {
        /// The payslip id that was not found.
        payslip_id: u64,
    },

    /// A date range with a start date after its end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// Attempt to regenerate or edit a payslip that is already PAID.
    #[error("Payslip {payslip_id} for {month} is paid and locked")]
    PayslipLocked {
        /// The locked payslip id.
        payslip_id: u64,
        /// The payslip month ("YYYY-MM").
        month: String,
    },

    /// Attempt to decide a leave request that is no longer pending.
    #[error("Leave request {request_id} is already {current_status}")]
    InvalidLeaveTransition {
        /// The leave request id.
        request_id: u64,
        /// The current (terminal) status of the request.
        current_status: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "emp_099".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_099");
    }

    #[test]
    fn test_invalid_date_range_displays_both_dates() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: start 2024-03-10 is after end 2024-03-01"
        );
    }

    #[test]
    fn test_payslip_locked_displays_month() {
        let error = EngineError::PayslipLocked {
            payslip_id: 7,
            month: "2024-03".to_string(),
        };
        assert_eq!(error.to_string(), "Payslip 7 for 2024-03 is paid and locked");
    }

    #[test]
    fn test_invalid_leave_transition_displays_status() {
        let error = EngineError::InvalidLeaveTransition {
            request_id: 5,
            current_status: "APPROVED".to_string(),
        };
        assert_eq!(error.to_string(), "Leave request 5 is already APPROVED");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_employee_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_employee_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
