// ABOUTME: Environment variable name constants and their defaults
// ABOUTME: Centralized definitions of every environment variable Tally reads

// Backend API Configuration
pub const TALLY_API_URL: &str = "TALLY_API_URL";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:4242";

// HTTP Client Timeouts
pub const TALLY_HTTP_REQUEST_TIMEOUT_SECS: &str = "TALLY_HTTP_REQUEST_TIMEOUT_SECS";
pub const TALLY_HTTP_CONNECT_TIMEOUT_SECS: &str = "TALLY_HTTP_CONNECT_TIMEOUT_SECS";
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";
