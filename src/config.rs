//! Build-time client configuration.
//!
//! The browser has no process environment, so the API base URL is baked in
//! at compile time from `BANKSYS_API_BASE_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// Backend used when `BANKSYS_API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/BankingSystemBackend/api";

/// Pause between a successful transaction and the return to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Base URL of the banking REST API.
pub fn api_base_url() -> &'static str {
    resolve_base_url(option_env!("BANKSYS_API_BASE_URL"))
}

fn resolve_base_url(configured: Option<&'static str>) -> &'static str {
    configured
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
}
