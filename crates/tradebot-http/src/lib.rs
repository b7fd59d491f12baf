//! tradebot-http - Authenticated HTTP client for the TradeBOT backend.
//!
//! [`ApiClient`] attaches bearer tokens to every request and, on a `401`,
//! refreshes the access token once and retries once before failing.

mod client;
pub mod endpoints;
mod options;
mod resources;

pub use client::{ApiClient, AuthState};
pub use options::RequestOptions;
pub use reqwest::Method;
