//! Payslip and advance-salary models.
//!
//! A payslip is a snapshot per (employee, month), not a live view: once
//! its status is `Paid` it is immutable to regeneration. Advance-salary
//! requests carry a one-way `deducted` flag so a payroll run can never
//! consume the same approved advance twice.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayslipStatus {
    /// Created or recomputed; still editable.
    Draft,
    /// Terminal; the payslip is locked against regeneration and edits.
    Paid,
}

/// A monthly payslip snapshot for one employee.
///
/// Holds both the financial outcome and the attendance counts that
/// produced it, for audit and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: u64,
    /// The employee this payslip belongs to.
    pub employee_id: String,
    /// The payslip month, formatted "YYYY-MM".
    pub month: String,
    /// When the payslip was last generated.
    pub generated_at: NaiveDateTime,
    /// Lifecycle status; `Paid` locks the record.
    pub status: PayslipStatus,
    /// Monthly salary at the time of generation.
    pub basic_salary: Decimal,
    /// Fixed allowance at the time of generation.
    pub allowance_amount: Decimal,
    /// One-time bonus, editable while the payslip is a draft.
    pub bonus_amount: Decimal,
    /// Total deductions (absence, unpaid leave, late penalty, advances).
    pub deduction_amount: Decimal,
    /// Net salary after allowance, bonus, and deductions.
    pub net_salary: Decimal,
    /// Standard working days in the month (schedule-wide).
    pub total_working_days: u32,
    /// Days with at least one punch.
    pub present_days: u32,
    /// Unapproved absences on working days.
    pub absent_days: u32,
    /// Approved unpaid-leave days on working days.
    pub unpaid_leave_days: u32,
    /// Approved paid-leave days on working days.
    pub paid_leave_days: u32,
    /// Days where the earliest punch exceeded the late threshold.
    pub late_days: u32,
    /// Deduction attributable to accrued late penalties.
    pub late_penalty_amount: Decimal,
    /// Approved advance-salary amount deducted this month.
    pub advance_salary_amount: Decimal,
}

impl Payslip {
    /// Returns true if the payslip is locked against regeneration.
    pub fn is_locked(&self) -> bool {
        self.status == PayslipStatus::Paid
    }
}

/// Lifecycle status of an advance-salary request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvanceStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; eligible for deduction in the next payroll run.
    Approved,
    /// Rejected; never deducted.
    Rejected,
    /// Consumed by a payroll run.
    Paid,
}

/// An employee's request to draw salary in advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceSalaryRequest {
    /// Unique identifier for the request.
    pub id: u64,
    /// The requesting employee.
    pub employee_id: String,
    /// The requested amount.
    pub amount: Decimal,
    /// Free-text reason for the request.
    pub reason: String,
    /// Current lifecycle status.
    pub status: AdvanceStatus,
    /// Reviewer comment, set when the request is decided.
    pub admin_comment: Option<String>,
    /// One-way flag, set true exactly once when a payroll run deducts it.
    pub deducted: bool,
    /// When the request was created.
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn create_payslip(status: PayslipStatus) -> Payslip {
        Payslip {
            id: 1,
            employee_id: "emp_001".to_string(),
            month: "2024-03".to_string(),
            generated_at: NaiveDateTime::parse_from_str(
                "2024-04-01 08:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            status,
            basic_salary: Decimal::new(30_000, 0),
            allowance_amount: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
            deduction_amount: Decimal::ZERO,
            net_salary: Decimal::new(30_000, 0),
            total_working_days: 21,
            present_days: 21,
            absent_days: 0,
            unpaid_leave_days: 0,
            paid_leave_days: 0,
            late_days: 0,
            late_penalty_amount: Decimal::ZERO,
            advance_salary_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_paid_payslip_is_locked() {
        assert!(create_payslip(PayslipStatus::Paid).is_locked());
        assert!(!create_payslip(PayslipStatus::Draft).is_locked());
    }

    #[test]
    fn test_payslip_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PayslipStatus::Draft).unwrap(),
            "\"DRAFT\""
        );
        assert_eq!(
            serde_json::to_string(&PayslipStatus::Paid).unwrap(),
            "\"PAID\""
        );
    }

    #[test]
    fn test_advance_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AdvanceStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&AdvanceStatus::Paid).unwrap(),
            "\"PAID\""
        );
    }

    #[test]
    fn test_payslip_serialization_round_trip() {
        let payslip = create_payslip(PayslipStatus::Draft);
        let json = serde_json::to_string(&payslip).unwrap();
        let deserialized: Payslip = serde_json::from_str(&json).unwrap();
        assert_eq!(payslip, deserialized);
    }
}
