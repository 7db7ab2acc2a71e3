//! Public holiday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single-date public holiday.
///
/// Treated as a non-working day like a weekend, but tracked separately
/// so reports can label the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday label (e.g. "Victory Day").
    pub name: String,
}
