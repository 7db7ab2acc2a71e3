//! Classification logic for the attendance engine.
//!
//! This module contains the schedule resolver, the daily status
//! classifier, and the leave-quota allocator. These are the pieces with
//! real ordering and precedence invariants; reporting and payroll are
//! accumulations over their output.

mod leave_allocation;
mod resolver;
mod status;

pub use leave_allocation::{allocate_leave, LeaveAllocation};
pub use resolver::{apply_shift_override, resolve_schedule};
pub use status::{classify_day, DayContext, DayObservation, DayStatus, LeavePay};
