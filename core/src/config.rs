//! Client configuration.

/// Root every request is resolved against.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/";

/// Fixed settings of an `ApiClient`, captured once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent with every request.
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Default headers against a different base address. Used to point the
    /// client at a mock server on an ephemeral port.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }
}
