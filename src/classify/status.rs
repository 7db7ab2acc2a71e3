//! Daily status classification.
//!
//! Given one employee-day of punches plus the resolved schedule and the
//! leave/holiday context, the classifier produces a single [`DayStatus`]
//! and the observed in/out times. Precedence is an explicit ordered rule
//! list rather than emergent from nested branches:
//!
//! 1. approved leave (short-circuits everything, even punches)
//! 2. presence (at least one punch)
//! 3. calendar off-day (weekend/holiday, no punch)
//! 4. absence
//!
//! Punches on a weekend or holiday classify as [`DayStatus::PresentOnHoliday`]
//! and are never checked against late/early tolerances; there is no
//! working-day obligation to measure against.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceLogEntry, WorkSchedule};

/// Whether a leave day is covered by the annual quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeavePay {
    /// Consumed one unit of quota.
    Paid,
    /// Quota exhausted, or inherently unpaid leave type.
    Unpaid,
}

/// The classification of one employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    /// Punched in and out within tolerances on a working day.
    Present,
    /// Earliest punch after the late threshold.
    Late,
    /// Latest punch before the early-leave threshold.
    EarlyLeave,
    /// Both late and early on the same day.
    LateAndEarly,
    /// Working day with no punch and no leave.
    Absent,
    /// Covered by approved leave; the payload says whether quota covered it.
    Leave(LeavePay),
    /// Configured weekend day with no punch.
    Weekend,
    /// Public holiday with no punch.
    Holiday,
    /// Punched on a weekend or holiday; counted as present.
    PresentOnHoliday,
}

impl DayStatus {
    /// Returns true for any present-variant status.
    pub fn is_present(&self) -> bool {
        matches!(
            self,
            DayStatus::Present
                | DayStatus::Late
                | DayStatus::EarlyLeave
                | DayStatus::LateAndEarly
                | DayStatus::PresentOnHoliday
        )
    }
}

/// Everything the classifier needs to know about one employee-day.
#[derive(Debug, Clone)]
pub struct DayContext<'a> {
    /// The calendar date under classification.
    pub date: NaiveDate,
    /// That day's punches for the employee, in any order.
    pub punches: &'a [AttendanceLogEntry],
    /// The resolved effective schedule for the day.
    pub schedule: &'a WorkSchedule,
    /// Whether the date is a public holiday.
    pub is_holiday: bool,
    /// Leave coverage for the date, from the quota allocator.
    pub on_leave: Option<LeavePay>,
}

impl DayContext<'_> {
    fn is_off_day(&self) -> bool {
        self.is_holiday || self.schedule.is_weekend(self.date)
    }
}

/// The classifier's output for one employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayObservation {
    /// The classified status.
    pub status: DayStatus,
    /// Earliest punch time, when punches exist.
    pub in_time: Option<NaiveTime>,
    /// Latest punch time, when punches exist.
    pub out_time: Option<NaiveTime>,
    /// Minutes past the scheduled start, when flagged late.
    pub late_minutes: i64,
    /// Minutes before the scheduled end, when flagged early.
    pub early_minutes: i64,
}

impl DayObservation {
    fn bare(status: DayStatus) -> Self {
        Self {
            status,
            in_time: None,
            out_time: None,
            late_minutes: 0,
            early_minutes: 0,
        }
    }
}

type Rule = fn(&DayContext) -> Option<DayObservation>;

/// The precedence order: leave > presence > calendar-off > absence.
const RULES: &[Rule] = &[leave_rule, presence_rule, calendar_off_rule, absence_rule];

/// Classifies one employee-day.
///
/// # Examples
///
/// ```
/// use attendance_engine::classify::{classify_day, DayContext, DayStatus};
/// use attendance_engine::models::{AttendanceLogEntry, WorkSchedule};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let schedule = WorkSchedule::default();
/// let punch = |stamp: &str| AttendanceLogEntry {
///     employee_id: "emp_001".to_string(),
///     timestamp: NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap(),
///     device_id: "gate-1".to_string(),
/// };
/// let punches = vec![
///     punch("2024-03-05 09:10:00"),
///     punch("2024-03-05 18:05:00"),
/// ];
///
/// let observation = classify_day(&DayContext {
///     date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     punches: &punches,
///     schedule: &schedule,
///     is_holiday: false,
///     on_leave: None,
/// });
///
/// // 09:10 is within the 15-minute tolerance, 18:05 is past the end.
/// assert_eq!(observation.status, DayStatus::Present);
/// ```
pub fn classify_day(ctx: &DayContext) -> DayObservation {
    for rule in RULES {
        if let Some(observation) = rule(ctx) {
            return observation;
        }
    }
    DayObservation::bare(DayStatus::Absent)
}

/// Rule 1: approved leave wins over a coincidental punch or calendar status.
fn leave_rule(ctx: &DayContext) -> Option<DayObservation> {
    ctx.on_leave
        .map(|pay| DayObservation::bare(DayStatus::Leave(pay)))
}

/// Rule 2: at least one punch means present, with late/early checks only
/// on ordinary working days.
fn presence_rule(ctx: &DayContext) -> Option<DayObservation> {
    let in_time = ctx.punches.iter().map(|p| p.timestamp.time()).min()?;
    let out_time = ctx
        .punches
        .iter()
        .map(|p| p.timestamp.time())
        .max()
        .unwrap_or(in_time);

    if ctx.is_off_day() {
        return Some(DayObservation {
            status: DayStatus::PresentOnHoliday,
            in_time: Some(in_time),
            out_time: Some(out_time),
            late_minutes: 0,
            early_minutes: 0,
        });
    }

    let schedule = ctx.schedule;
    let is_late = in_time > schedule.late_threshold();
    let is_early = out_time < schedule.early_threshold();

    // Durations are measured from the raw start/end, not the thresholds.
    let late_minutes = if is_late {
        (in_time - schedule.start_time).num_minutes()
    } else {
        0
    };
    let early_minutes = if is_early {
        (schedule.end_time - out_time).num_minutes()
    } else {
        0
    };

    let status = match (is_late, is_early) {
        (true, true) => DayStatus::LateAndEarly,
        (true, false) => DayStatus::Late,
        (false, true) => DayStatus::EarlyLeave,
        (false, false) => DayStatus::Present,
    };

    Some(DayObservation {
        status,
        in_time: Some(in_time),
        out_time: Some(out_time),
        late_minutes,
        early_minutes,
    })
}

/// Rule 3: no punch on a weekend or holiday is simply an off day.
fn calendar_off_rule(ctx: &DayContext) -> Option<DayObservation> {
    if !ctx.is_off_day() {
        return None;
    }
    let status = if ctx.is_holiday {
        DayStatus::Holiday
    } else {
        DayStatus::Weekend
    };
    Some(DayObservation::bare(status))
}

/// Rule 4: anything left is an unapproved absence.
fn absence_rule(_ctx: &DayContext) -> Option<DayObservation> {
    Some(DayObservation::bare(DayStatus::Absent))
}
