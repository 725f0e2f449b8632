//! HTTP client module with status classification.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{ApiError, check_status, classify_response, log_refresh_failure};
