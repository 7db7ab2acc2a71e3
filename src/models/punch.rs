//! Attendance log (punch) model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An immutable punch fact captured from a biometric terminal.
///
/// Multiple entries per employee per day are expected; the earliest
/// is treated as a check-in and the latest as a check-out. Entries are
/// appended by the device ingestion adapter, which deduplicates by
/// (employee, timestamp, device).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLogEntry {
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch occurred.
    pub timestamp: NaiveDateTime,
    /// The terminal that captured the punch.
    pub device_id: String,
}

impl AttendanceLogEntry {
    /// Returns the calendar date of the punch.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
