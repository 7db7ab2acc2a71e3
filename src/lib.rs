//! Attendance Classification & Payroll Accrual Engine
//!
//! This crate turns raw biometric punch records, leave requests, holiday
//! calendars, and per-employee shift overrides into daily status
//! classifications, leave-quota accounting, and monthly payroll.

#![warn(missing_docs)]

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod report;
pub mod store;
