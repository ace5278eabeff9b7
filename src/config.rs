//! Transport defaults and wire-format constants.

use std::time::Duration;

/// Content type for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

/// Content type for URL-encoded form bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Default multipart field name for uploaded files.
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Connect timeout for new connections.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Idle pooled connections are dropped after this long.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Maximum idle pooled connections kept per host.
pub const POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Environment variables consulted for `https` targets, in order.
pub const HTTPS_PROXY_VARS: [&str; 2] = ["HTTPS_PROXY", "https_proxy"];

/// Environment variables consulted for `http` targets, in order.
pub const HTTP_PROXY_VARS: [&str; 2] = ["HTTP_PROXY", "http_proxy"];
