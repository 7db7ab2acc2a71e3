//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::payroll::generate_payroll_for_month;
use crate::report::{
    daily_report, employee_monthly_report, employee_range_report, monthly_report, weekly_report,
};

use super::request::{
    DailyReportQuery, EmployeeMonthQuery, EmployeeRangeQuery, MonthlyReportQuery,
    PayrollRunRequest, WeeklyReportQuery, page_request,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reports/daily", get(daily_report_handler))
        .route("/reports/weekly", get(weekly_report_handler))
        .route("/reports/monthly", get(monthly_report_handler))
        .route(
            "/reports/employees/:employee_id/monthly",
            get(employee_monthly_handler),
        )
        .route(
            "/reports/employees/:employee_id/range",
            get(employee_range_handler),
        )
        .route("/payroll/run", post(payroll_run_handler))
        .with_state(state)
}

fn ok_json<T: serde::Serialize>(body: T) -> axum::response::Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> axum::response::Response {
    (
        error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error.error),
    )
        .into_response()
}

/// Handler for GET /reports/daily.
async fn daily_report_handler(
    State(state): State<AppState>,
    Query(query): Query<DailyReportQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        date = %query.date,
        "Processing daily report request"
    );

    let page = page_request(query.page, query.per_page);
    match daily_report(
        state.store(),
        state.config(),
        query.date,
        query.department_id,
        &page,
    ) {
        Ok(report) => ok_json(report),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Daily report failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /reports/weekly.
async fn weekly_report_handler(
    State(state): State<AppState>,
    Query(query): Query<WeeklyReportQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        week_start = %query.week_start,
        "Processing weekly report request"
    );

    let page = page_request(query.page, query.per_page);
    match weekly_report(
        state.store(),
        state.config(),
        query.week_start,
        query.department_id,
        &page,
    ) {
        Ok(report) => ok_json(report),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Weekly report failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /reports/monthly.
async fn monthly_report_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthlyReportQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        year = query.year,
        month = query.month,
        "Processing monthly report request"
    );

    let page = page_request(query.page, query.per_page);
    match monthly_report(
        state.store(),
        state.config(),
        query.year,
        query.month,
        query.department_id,
        &page,
    ) {
        Ok(report) => ok_json(report),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Monthly report failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /reports/employees/{id}/monthly.
async fn employee_monthly_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<EmployeeMonthQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year = query.year,
        month = query.month,
        "Processing employee monthly report request"
    );

    match employee_monthly_report(
        state.store(),
        state.config(),
        &employee_id,
        query.year,
        query.month,
    ) {
        Ok(detail) => ok_json(detail),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Employee monthly report failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /reports/employees/{id}/range.
async fn employee_range_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<EmployeeRangeQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        start = %query.start_date,
        end = %query.end_date,
        "Processing employee range report request"
    );

    match employee_range_report(
        state.store(),
        state.config(),
        &employee_id,
        query.start_date,
        query.end_date,
    ) {
        Ok(detail) => ok_json(detail),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Employee range report failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /payroll/run.
///
/// Accepts a `"YYYY-MM"` month and generates or recomputes the DRAFT
/// payslips for that month.
async fn payroll_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let Some((year, month)) = request.parse_month() else {
        warn!(
            correlation_id = %correlation_id,
            month = %request.month,
            "Invalid payroll month"
        );
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ApiError::validation_error(format!(
                "month must be formatted as YYYY-MM, got '{}'",
                request.month
            ))),
        )
            .into_response();
    };

    info!(
        correlation_id = %correlation_id,
        month = %request.month,
        "Processing payroll run"
    );

    let start_time = Instant::now();
    match generate_payroll_for_month(state.store(), state.config(), year, month) {
        Ok(summary) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                month = %request.month,
                generated = summary.generated,
                skipped = summary.skipped,
                duration_us = duration.as_micros(),
                "Payroll run completed successfully"
            );
            ok_json(summary)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payroll run failed");
            error_response(err.into())
        }
    }
}
