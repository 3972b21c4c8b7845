//! Pre-configured channel to the todo API.
//!
//! # Design
//! `ApiClient` holds its `ClientConfig` and a `Transport`, and carries no
//! mutable state between calls. `fetch_data` is split into
//! `build_fetch_data` and `parse_fetch_data` so the request shape and the
//! decoding rules can be checked without any I/O.

use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Sub-path of the collection fetched by `fetch_data`.
pub const TODOS_PATH: &str = "/todos";

/// Decoded response body. Any JSON value; no structure is assumed.
pub type Payload = Value;

/// Client bound to one API root.
///
/// Base address and headers are fixed at construction; every request the
/// client builds carries them. The actual round-trip is delegated to the
/// `Transport`, so tests inject a scripted one.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    headers: Vec<(String, String)>,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: config.headers,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_fetch_data(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(TODOS_PATH),
            headers: self.headers.clone(),
            body: None,
        }
    }

    /// Decode a response the way a browser client would: any 2xx is
    /// success, a JSON body becomes its value, anything else becomes a JSON
    /// string holding the raw text.
    pub fn parse_fetch_data(&self, response: HttpResponse) -> Result<Payload, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.is_empty() {
            return Ok(Value::String(String::new()));
        }
        Ok(serde_json::from_str(&response.body).unwrap_or_else(|_| Value::String(response.body)))
    }

    /// GET the todo collection and return its decoded body.
    ///
    /// Every call is an independent round-trip. A failure is logged once
    /// here and then returned unchanged.
    pub async fn fetch_data(&self) -> Result<Payload, ApiError> {
        let request = self.build_fetch_data();
        debug!(url = %request.url, "fetching data");
        self.transport
            .execute(request)
            .await
            .and_then(|response| self.parse_fetch_data(response))
            .inspect_err(|err| error!(error = %err, "failed to fetch data"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
