//! Monthly payroll generation.
//!
//! A payroll run converts the month's classified attendance into payslip
//! financials. Per (employee, month) the payslip moves through a small
//! state machine: no payslip, then DRAFT on first generation, then PAID
//! once settled. A PAID payslip is terminal and never recomputed.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

use crate::classify::{DayStatus, LeavePay, resolve_schedule};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyRateBasis, Employee, Payslip, PayslipStatus};
use crate::report::allocation_for;
use crate::store::{AttendanceStore, EmployeeFilter};

/// Outcome of one payroll run, for logging and API responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PayrollRunSummary {
    /// Payslips written (created or recomputed) by this run.
    pub generated: u32,
    /// Employees skipped: guests, future joiners, or locked payslips.
    pub skipped: u32,
}

/// Generates or recomputes DRAFT payslips for every employee for the
/// given month.
///
/// Guests, employees joining after month-end, and employees whose
/// payslip for the month is already PAID are skipped. Approved advance
/// requests are claimed exactly once as a side effect; a recomputation
/// of the same DRAFT does not claim them again.
pub fn generate_payroll_for_month(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    year: i32,
    month: u32,
) -> EngineResult<PayrollRunSummary> {
    let (month_start, month_end) =
        crate::report::month_bounds(year, month).ok_or(EngineError::CalculationError {
            message: format!("invalid month {year}-{month:02}"),
        })?;
    let month_key = format!("{year}-{month:02}");

    let schedule = config.schedule();
    let standard_working_days = count_working_days(config, month_start, month_end);

    let employees = store.find_employees(&EmployeeFilter::default());
    let mut summary = PayrollRunSummary::default();

    for employee in &employees {
        if employee.is_guest {
            summary.skipped += 1;
            continue;
        }
        if employee
            .joining_date
            .is_some_and(|joined| joined > month_end)
        {
            summary.skipped += 1;
            continue;
        }

        let mut payslip = store.find_or_create_payslip(&employee.id, &month_key);
        if payslip.is_locked() {
            warn!(
                employee_id = %employee.id,
                month = %month_key,
                "payslip already paid, skipping"
            );
            summary.skipped += 1;
            continue;
        }

        compute_payslip(
            store,
            config,
            employee,
            &mut payslip,
            month_start,
            month_end,
            standard_working_days,
        )?;
        store.save_payslip(payslip);
        summary.generated += 1;
    }

    info!(
        month = %month_key,
        generated = summary.generated,
        skipped = summary.skipped,
        standard_working_days,
        basis = ?schedule.daily_rate_basis,
        "payroll run complete"
    );
    Ok(summary)
}

fn compute_payslip(
    store: &dyn AttendanceStore,
    config: &ConfigLoader,
    employee: &Employee,
    payslip: &mut Payslip,
    month_start: NaiveDate,
    month_end: NaiveDate,
    standard_working_days: u32,
) -> EngineResult<()> {
    let allocation = allocation_for(store, config, employee, month_start.year());
    let logs = store.find_logs(Some(&employee.id), month_start, month_end);

    let from = match employee.joining_date {
        Some(joined) if joined > month_start => joined,
        _ => month_start,
    };

    let mut present_days = 0u32;
    let mut absent_days = 0u32;
    let mut paid_leave_days = 0u32;
    let mut unpaid_leave_days = 0u32;
    let mut late_days = 0u32;

    let mut date = from;
    while date <= month_end {
        let day_logs: Vec<_> = logs.iter().filter(|l| l.date() == date).cloned().collect();
        let day_schedule = resolve_schedule(store, &employee.id, date, config.schedule())?;
        let working_day = !config.schedule().is_weekend(date) && !config.is_holiday(date);

        let context = crate::classify::DayContext {
            date,
            punches: &day_logs,
            schedule: &day_schedule,
            is_holiday: config.is_holiday(date),
            on_leave: allocation.pay_for(date),
        };
        let observation = crate::classify::classify_day(&context);

        match observation.status {
            status if status.is_present() => present_days += 1,
            DayStatus::Absent => absent_days += 1,
            DayStatus::Leave(LeavePay::Paid) if working_day => paid_leave_days += 1,
            DayStatus::Leave(LeavePay::Unpaid) if working_day => unpaid_leave_days += 1,
            _ => {}
        }

        // Lateness for the penalty counts the earliest punch, and only on
        // working days; off-day punches carry no expectations.
        if working_day {
            if let Some(first) = day_logs.iter().map(|l| l.timestamp.time()).min() {
                if first > day_schedule.late_threshold() {
                    late_days += 1;
                }
            }
        }

        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let schedule = config.schedule();
    let daily_rate = daily_rate(
        employee.monthly_salary,
        schedule.daily_rate_basis,
        standard_working_days,
        schedule.daily_rate_fixed_value,
    );

    let late_penalty = if schedule.late_penalty_threshold > 0 {
        let penalty_units = Decimal::from(late_days / schedule.late_penalty_threshold);
        penalty_units * schedule.late_penalty_deduction * daily_rate
    } else {
        Decimal::ZERO
    };

    // Newly claimed advances join whatever a prior draft of this slip
    // already claimed; recomputation must keep deducting those.
    let newly_claimed: Decimal = store
        .claim_pending_advances(&employee.id)
        .iter()
        .map(|a| a.amount)
        .sum();
    let advance_total = payslip.advance_salary_amount + newly_claimed;

    let absence_deduction = Decimal::from(absent_days + unpaid_leave_days) * daily_rate;
    let total_deductions = absence_deduction + late_penalty + advance_total;
    let net = employee.monthly_salary + employee.fixed_allowance + payslip.bonus_amount
        - total_deductions;

    payslip.status = PayslipStatus::Draft;
    payslip.generated_at = chrono::Utc::now().naive_utc();
    payslip.basic_salary = employee.monthly_salary;
    payslip.allowance_amount = employee.fixed_allowance;
    payslip.deduction_amount = round_money(total_deductions);
    payslip.net_salary = round_money(net);
    payslip.total_working_days = standard_working_days;
    payslip.present_days = present_days;
    payslip.absent_days = absent_days;
    payslip.unpaid_leave_days = unpaid_leave_days;
    payslip.paid_leave_days = paid_leave_days;
    payslip.late_days = late_days;
    payslip.late_penalty_amount = round_money(late_penalty);
    payslip.advance_salary_amount = advance_total;
    Ok(())
}

/// Marks a single DRAFT payslip PAID. PAID is terminal.
pub fn mark_paid(store: &dyn AttendanceStore, payslip_id: u64) -> EngineResult<Payslip> {
    let mut payslip = store
        .find_payslip(payslip_id)
        .ok_or(EngineError::PayslipNotFound { payslip_id })?;
    if payslip.is_locked() {
        return Err(EngineError::PayslipLocked {
            payslip_id,
            month: payslip.month,
        });
    }
    payslip.status = PayslipStatus::Paid;
    store.save_payslip(payslip.clone());
    Ok(payslip)
}

/// Marks every DRAFT payslip of a month PAID; already-PAID slips are
/// left alone. Returns the number transitioned.
pub fn mark_month_paid(store: &dyn AttendanceStore, month: &str) -> u32 {
    let mut transitioned = 0;
    for mut payslip in store.find_payslips_for_month(month) {
        if payslip.status == PayslipStatus::Draft {
            payslip.status = PayslipStatus::Paid;
            store.save_payslip(payslip);
            transitioned += 1;
        }
    }
    transitioned
}

/// Sets the bonus on a DRAFT payslip and recomputes its net salary from
/// the already-persisted financials.
pub fn update_bonus(
    store: &dyn AttendanceStore,
    payslip_id: u64,
    bonus: Decimal,
) -> EngineResult<Payslip> {
    let mut payslip = store
        .find_payslip(payslip_id)
        .ok_or(EngineError::PayslipNotFound { payslip_id })?;
    if payslip.is_locked() {
        return Err(EngineError::PayslipLocked {
            payslip_id,
            month: payslip.month,
        });
    }

    payslip.bonus_amount = bonus;
    let net =
        payslip.basic_salary + payslip.allowance_amount + bonus - payslip.deduction_amount;
    payslip.net_salary = round_money(net);
    store.save_payslip(payslip.clone());
    Ok(payslip)
}

/// Dates in `[start, end]` that are neither weekend nor public holiday
/// under the global schedule.
pub fn count_working_days(config: &ConfigLoader, start: NaiveDate, end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut date = start;
    while date <= end {
        if !config.schedule().is_weekend(date) && !config.is_holiday(date) {
            count += 1;
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}

fn daily_rate(
    monthly_salary: Decimal,
    basis: DailyRateBasis,
    standard_working_days: u32,
    fixed_days: u32,
) -> Decimal {
    let divisor = match basis {
        DailyRateBasis::Standard30 => 30,
        DailyRateBasis::ActualWorkingDays => standard_working_days,
        DailyRateBasis::FixedDays => fixed_days,
    };
    if divisor == 0 {
        // No working days in scope; skip per-day deductions entirely.
        return Decimal::ZERO;
    }
    monthly_salary / Decimal::from(divisor)
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
