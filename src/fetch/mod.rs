//! Resilient HTTP fetch layer for the SubX API.
//!
//! - [`ApiClient`] - JSON and streaming calls with parameter placement by
//!   method and transparent transport decompression
//! - [`apply_headers`] / [`split_auth_value`] - two-tier header application
//! - [`RetryPolicy`] - the bounded, delay-free download retry policy
//! - [`FetchError`] - error taxonomy for remote calls

mod client;
mod error;
mod headers;
mod retry;

pub use client::ApiClient;
pub use error::FetchError;
pub use headers::{AppliedHeaders, apply_headers, split_auth_value};
pub use retry::{DOWNLOAD_MAX_ATTEMPTS, RetryDecision, RetryPolicy};
