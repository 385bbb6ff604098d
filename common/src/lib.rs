//! Wire and domain types shared by the report service.
//!
//! - `model`: cell values, rows and the validated report request.
//! - `requests`: the raw JSON payload accepted by the report endpoints.
//! - `responses`: JSON bodies returned by the service.

pub mod model;
pub mod requests;
pub mod responses;
