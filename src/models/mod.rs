//! Domain models for the attendance engine.
//!
//! This module contains the entity types consumed and produced by the
//! engine: employees and departments, punch records, work schedules and
//! shift overrides, leave requests, public holidays, payslips, and
//! advance-salary requests.

mod employee;
mod holiday;
mod leave;
mod payslip;
mod punch;
mod schedule;

pub use employee::{Department, Employee};
pub use holiday::PublicHoliday;
pub use leave::{LeaveRequest, LeaveStatus};
pub use payslip::{AdvanceSalaryRequest, AdvanceStatus, Payslip, PayslipStatus};
pub use punch::AttendanceLogEntry;
pub use schedule::{DailyRateBasis, Shift, ShiftAssignment, WorkSchedule};
