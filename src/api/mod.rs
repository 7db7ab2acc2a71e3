//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for attendance reports and
//! payroll runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PayrollRunRequest;
pub use response::ApiError;
pub use state::AppState;
