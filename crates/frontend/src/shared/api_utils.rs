//! API utilities for frontend-backend communication

use super::config::config;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location, the
/// configured backend port and path prefix.
///
/// # Returns
/// - API base URL like "http://localhost:8080"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    let api = config().api;
    format!("{}//{}:{}{}", protocol, hostname, api.port, api.prefix)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/quotes/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
