//! Persistence seam for the engine.
//!
//! The engine reads and writes entities through the [`AttendanceStore`]
//! trait; everything behind it (a database in production, [`MemoryStore`]
//! here and in tests) is an external collaborator. Lookups are keyed by
//! employee and date range, writes are simple upserts of computed results.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdvanceSalaryRequest, AdvanceStatus, AttendanceLogEntry, Employee, LeaveRequest, LeaveStatus,
    Payslip, PayslipStatus, Shift, ShiftAssignment,
};

/// Selects the employee set for reports and payroll.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Restrict to one department when set.
    pub department_id: Option<u64>,
    /// Drop guests; guests never appear in statistics or payroll.
    pub exclude_guests: bool,
}

/// Read/write operations the engine needs from its persistence collaborator.
pub trait AttendanceStore: Send + Sync {
    /// Returns employees matching the filter, ordered by id.
    fn find_employees(&self, filter: &EmployeeFilter) -> Vec<Employee>;

    /// Looks up a single employee.
    fn find_employee(&self, employee_id: &str) -> Option<Employee>;

    /// Returns punches in `[start, end]`, optionally for one employee.
    fn find_logs(
        &self,
        employee_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceLogEntry>;

    /// Returns approved leave requests intersecting `[start, end]`,
    /// optionally for one employee.
    fn find_approved_leaves(
        &self,
        employee_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<LeaveRequest>;

    /// Looks up a leave request by id.
    fn find_leave_request(&self, request_id: u64) -> Option<LeaveRequest>;

    /// Upserts a leave request.
    fn save_leave_request(&self, request: LeaveRequest);

    /// Looks up a shift by id.
    fn find_shift(&self, shift_id: u64) -> Option<Shift>;

    /// Returns the shift assignment active for an employee on a date.
    ///
    /// When overlapping assignments cover the date, the most recently
    /// created one (highest id) wins.
    fn find_active_shift_assignment(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Option<ShiftAssignment>;

    /// Upserts a shift assignment; an id of zero allocates a fresh id.
    /// Returns the stored assignment.
    fn save_assignment(&self, assignment: ShiftAssignment) -> ShiftAssignment;

    /// Returns the payslip for (employee, month), creating an empty
    /// draft when none exists.
    fn find_or_create_payslip(&self, employee_id: &str, month: &str) -> Payslip;

    /// Looks up a payslip by id.
    fn find_payslip(&self, payslip_id: u64) -> Option<Payslip>;

    /// Returns all payslips for a "YYYY-MM" month.
    fn find_payslips_for_month(&self, month: &str) -> Vec<Payslip>;

    /// Upserts a payslip.
    fn save_payslip(&self, payslip: Payslip);

    /// Atomically claims the employee's approved, not-yet-deducted
    /// advance requests: flips `deducted` to true, transitions them to
    /// PAID, and returns them. Two concurrent payroll runs can never
    /// both claim the same advance.
    fn claim_pending_advances(&self, employee_id: &str) -> Vec<AdvanceSalaryRequest>;

    /// Upserts an advance-salary request.
    fn save_advance(&self, advance: AdvanceSalaryRequest);
}

/// Decides a pending leave request.
///
/// PENDING is the only transition source; deciding an already-decided
/// request returns [`EngineError::InvalidLeaveTransition`].
pub fn decide_leave(
    store: &dyn AttendanceStore,
    request_id: u64,
    approve: bool,
    comment: Option<String>,
    reviewed_by: &str,
) -> EngineResult<LeaveRequest> {
    let mut request = store
        .find_leave_request(request_id)
        .ok_or(EngineError::LeaveRequestNotFound { request_id })?;

    if request.status != LeaveStatus::Pending {
        return Err(EngineError::InvalidLeaveTransition {
            request_id,
            current_status: request.status.to_string(),
        });
    }
    if request.start_date > request.end_date {
        return Err(EngineError::InvalidDateRange {
            start: request.start_date,
            end: request.end_date,
        });
    }

    request.status = if approve {
        LeaveStatus::Approved
    } else {
        LeaveStatus::Rejected
    };
    request.admin_comment = comment;
    request.reviewed_by = Some(reviewed_by.to_string());
    store.save_leave_request(request.clone());
    Ok(request)
}

/// Assigns a shift to an employee over an inclusive date range.
///
/// Validates that the employee and shift exist and that the range is
/// ordered. Overlaps with existing assignments are allowed; lookups
/// resolve them deterministically (most recently created wins).
pub fn assign_shift(
    store: &dyn AttendanceStore,
    employee_id: &str,
    shift_id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> EngineResult<ShiftAssignment> {
    let employee = store
        .find_employee(employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;
    if store.find_shift(shift_id).is_none() {
        return Err(EngineError::ShiftNotFound { shift_id });
    }
    if start_date > end_date {
        return Err(EngineError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }

    Ok(store.save_assignment(ShiftAssignment {
        id: 0,
        employee_id: employee.id,
        shift_id,
        start_date,
        end_date,
    }))
}

#[derive(Debug, Default)]
struct StoreInner {
    employees: HashMap<String, Employee>,
    logs: Vec<AttendanceLogEntry>,
    leaves: HashMap<u64, LeaveRequest>,
    shifts: HashMap<u64, Shift>,
    assignments: HashMap<u64, ShiftAssignment>,
    payslips: HashMap<u64, Payslip>,
    advances: HashMap<u64, AdvanceSalaryRequest>,
    next_assignment_id: u64,
    next_payslip_id: u64,
}

/// In-memory [`AttendanceStore`] implementation.
///
/// All mutation happens under one `RwLock`, which makes the advance
/// claim and payslip upsert atomic with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an employee.
    pub fn insert_employee(&self, employee: Employee) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.employees.insert(employee.id.clone(), employee);
    }

    /// Appends a punch record.
    pub fn insert_log(&self, log: AttendanceLogEntry) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.logs.push(log);
    }

    /// Inserts a leave request.
    pub fn insert_leave(&self, request: LeaveRequest) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.leaves.insert(request.id, request);
    }

    /// Inserts a shift definition.
    pub fn insert_shift(&self, shift: Shift) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.shifts.insert(shift.id, shift);
    }

    /// Inserts a shift assignment with an explicit id.
    pub fn insert_assignment(&self, assignment: ShiftAssignment) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.next_assignment_id = inner.next_assignment_id.max(assignment.id);
        inner.assignments.insert(assignment.id, assignment);
    }

    /// Inserts an advance-salary request.
    pub fn insert_advance(&self, advance: AdvanceSalaryRequest) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.advances.insert(advance.id, advance);
    }

    /// Returns all advance requests for an employee.
    pub fn advances_for(&self, employee_id: &str) -> Vec<AdvanceSalaryRequest> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut advances: Vec<_> = inner
            .advances
            .values()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect();
        advances.sort_by_key(|a| a.id);
        advances
    }
}

impl AttendanceStore for MemoryStore {
    fn find_employees(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut employees: Vec<_> = inner
            .employees
            .values()
            .filter(|e| !(filter.exclude_guests && e.is_guest))
            .filter(|e| {
                filter
                    .department_id
                    .is_none_or(|dept| e.department_id == Some(dept))
            })
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        employees
    }

    fn find_employee(&self, employee_id: &str) -> Option<Employee> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.employees.get(employee_id).cloned()
    }

    fn find_logs(
        &self,
        employee_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceLogEntry> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut logs: Vec<_> = inner
            .logs
            .iter()
            .filter(|l| l.date() >= start && l.date() <= end)
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .cloned()
            .collect();
        logs.sort_by_key(|l| l.timestamp);
        logs
    }

    fn find_approved_leaves(
        &self,
        employee_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<LeaveRequest> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut leaves: Vec<_> = inner
            .leaves
            .values()
            .filter(|l| l.status == LeaveStatus::Approved)
            .filter(|l| l.start_date <= end && l.end_date >= start)
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .cloned()
            .collect();
        leaves.sort_by_key(|l| (l.start_date, l.id));
        leaves
    }

    fn find_leave_request(&self, request_id: u64) -> Option<LeaveRequest> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.leaves.get(&request_id).cloned()
    }

    fn save_leave_request(&self, request: LeaveRequest) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.leaves.insert(request.id, request);
    }

    fn find_shift(&self, shift_id: u64) -> Option<Shift> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.shifts.get(&shift_id).cloned()
    }

    fn find_active_shift_assignment(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Option<ShiftAssignment> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner
            .assignments
            .values()
            .filter(|a| a.employee_id == employee_id && a.contains(date))
            .max_by_key(|a| a.id)
            .cloned()
    }

    fn save_assignment(&self, mut assignment: ShiftAssignment) -> ShiftAssignment {
        let mut inner = self.inner.write().expect("store lock poisoned");
        if assignment.id == 0 {
            inner.next_assignment_id += 1;
            assignment.id = inner.next_assignment_id;
        } else {
            inner.next_assignment_id = inner.next_assignment_id.max(assignment.id);
        }
        inner.assignments.insert(assignment.id, assignment.clone());
        assignment
    }

    fn find_or_create_payslip(&self, employee_id: &str, month: &str) -> Payslip {
        let mut inner = self.inner.write().expect("store lock poisoned");
        if let Some(existing) = inner
            .payslips
            .values()
            .find(|p| p.employee_id == employee_id && p.month == month)
        {
            return existing.clone();
        }

        inner.next_payslip_id += 1;
        let payslip = Payslip {
            id: inner.next_payslip_id,
            employee_id: employee_id.to_string(),
            month: month.to_string(),
            generated_at: Utc::now().naive_utc(),
            status: PayslipStatus::Draft,
            basic_salary: Decimal::ZERO,
            allowance_amount: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
            deduction_amount: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            total_working_days: 0,
            present_days: 0,
            absent_days: 0,
            unpaid_leave_days: 0,
            paid_leave_days: 0,
            late_days: 0,
            late_penalty_amount: Decimal::ZERO,
            advance_salary_amount: Decimal::ZERO,
        };
        inner.payslips.insert(payslip.id, payslip.clone());
        payslip
    }

    fn find_payslip(&self, payslip_id: u64) -> Option<Payslip> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.payslips.get(&payslip_id).cloned()
    }

    fn find_payslips_for_month(&self, month: &str) -> Vec<Payslip> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut payslips: Vec<_> = inner
            .payslips
            .values()
            .filter(|p| p.month == month)
            .cloned()
            .collect();
        payslips.sort_by_key(|p| p.id);
        payslips
    }

    fn save_payslip(&self, payslip: Payslip) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.next_payslip_id = inner.next_payslip_id.max(payslip.id);
        inner.payslips.insert(payslip.id, payslip);
    }

    fn claim_pending_advances(&self, employee_id: &str) -> Vec<AdvanceSalaryRequest> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let mut claimed = Vec::new();
        for advance in inner.advances.values_mut() {
            if advance.employee_id == employee_id
                && advance.status == AdvanceStatus::Approved
                && !advance.deducted
            {
                advance.deducted = true;
                advance.status = AdvanceStatus::Paid;
                claimed.push(advance.clone());
            }
        }
        claimed.sort_by_key(|a| a.id);
        claimed
    }

    fn save_advance(&self, advance: AdvanceSalaryRequest) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.advances.insert(advance.id, advance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn employee(id: &str, department_id: Option<u64>, is_guest: bool) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            department_id,
            is_guest,
            joining_date: None,
            monthly_salary: Decimal::new(30_000, 0),
            fixed_allowance: Decimal::ZERO,
            leave_quota_override: None,
        }
    }

    fn advance(id: u64, employee_id: &str, status: AdvanceStatus) -> AdvanceSalaryRequest {
        AdvanceSalaryRequest {
            id,
            employee_id: employee_id.to_string(),
            amount: Decimal::new(5_000, 0),
            reason: "medical".to_string(),
            status,
            admin_comment: None,
            deducted: false,
            created_at: NaiveDateTime::parse_from_str("2024-03-01 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn test_filter_excludes_guests_and_other_departments() {
        let store = MemoryStore::new();
        store.insert_employee(employee("emp_001", Some(1), false));
        store.insert_employee(employee("emp_002", Some(2), false));
        store.insert_employee(employee("emp_003", Some(1), true));

        let all = store.find_employees(&EmployeeFilter::default());
        assert_eq!(all.len(), 3);

        let staff = store.find_employees(&EmployeeFilter {
            department_id: None,
            exclude_guests: true,
        });
        assert_eq!(staff.len(), 2);

        let dept_one = store.find_employees(&EmployeeFilter {
            department_id: Some(1),
            exclude_guests: true,
        });
        assert_eq!(dept_one.len(), 1);
        assert_eq!(dept_one[0].id, "emp_001");
    }

    #[test]
    fn test_claim_pending_advances_is_one_shot() {
        let store = MemoryStore::new();
        store.insert_advance(advance(1, "emp_001", AdvanceStatus::Approved));
        store.insert_advance(advance(2, "emp_001", AdvanceStatus::Pending));
        store.insert_advance(advance(3, "emp_002", AdvanceStatus::Approved));

        let claimed = store.claim_pending_advances("emp_001");
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].id, 1);
        assert!(claimed[0].deducted);
        assert_eq!(claimed[0].status, AdvanceStatus::Paid);

        // A second claim finds nothing left.
        assert!(store.claim_pending_advances("emp_001").is_empty());
        // The other employee's advance is untouched.
        assert_eq!(store.claim_pending_advances("emp_002").len(), 1);
    }

    #[test]
    fn test_find_or_create_payslip_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.find_or_create_payslip("emp_001", "2024-03");
        let second = store.find_or_create_payslip("emp_001", "2024-03");
        assert_eq!(first.id, second.id);

        let other_month = store.find_or_create_payslip("emp_001", "2024-04");
        assert_ne!(first.id, other_month.id);
    }

    #[test]
    fn test_overlapping_assignments_latest_wins() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        store.insert_assignment(ShiftAssignment {
            id: 1,
            employee_id: "emp_001".to_string(),
            shift_id: 10,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        });
        store.insert_assignment(ShiftAssignment {
            id: 2,
            employee_id: "emp_001".to_string(),
            shift_id: 20,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        });

        let active = store.find_active_shift_assignment("emp_001", date).unwrap();
        assert_eq!(active.shift_id, 20);
    }

    #[test]
    fn test_decide_leave_only_from_pending() {
        let store = MemoryStore::new();
        store.insert_leave(LeaveRequest {
            id: 1,
            employee_id: "emp_001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 3).unwrap(),
            leave_type: "Sick".to_string(),
            status: LeaveStatus::Pending,
            admin_comment: None,
            reviewed_by: None,
            created_at: NaiveDateTime::parse_from_str(
                "2024-03-20 09:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
        });

        let approved = decide_leave(&store, 1, true, Some("ok".to_string()), "hr@corp").unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.reviewed_by.as_deref(), Some("hr@corp"));

        // Terminal once approved.
        let again = decide_leave(&store, 1, false, None, "hr@corp");
        assert!(matches!(
            again,
            Err(EngineError::InvalidLeaveTransition { .. })
        ));
    }

    #[test]
    fn test_assign_shift_validates_inputs() {
        let store = MemoryStore::new();
        store.insert_employee(employee("emp_001", None, false));
        store.insert_shift(Shift {
            id: 5,
            name: "Night".to_string(),
            start_time: chrono::NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            late_tolerance_minutes: 15,
            early_leave_tolerance_minutes: 15,
        });

        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let assignment = assign_shift(&store, "emp_001", 5, start, end).unwrap();
        assert!(assignment.id > 0);

        assert!(matches!(
            assign_shift(&store, "emp_404", 5, start, end),
            Err(EngineError::EmployeeNotFound { .. })
        ));
        assert!(matches!(
            assign_shift(&store, "emp_001", 99, start, end),
            Err(EngineError::ShiftNotFound { .. })
        ));
        assert!(matches!(
            assign_shift(&store, "emp_001", 5, end, start),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }
}
