//! `ureq`-backed transport for the todo viewer.
//!
//! # Design
//! ureq is blocking, so each request runs on tokio's blocking pool and the
//! task driving the view stays responsive (teardown can still win the
//! race). Status codes are returned as data: the agent is built with
//! `http_status_as_error(false)` so `ApiClient` decides what counts as a
//! failure.
//!
//! A blocking call cannot be cancelled. When teardown wins, the call is
//! left to its timeout and `run_app` shuts the runtime down without
//! waiting for it.

use std::future::Future;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use todo_viewer_core::{
    ApiError, App, HttpMethod, HttpRequest, HttpResponse, RunOutcome, Transport,
};
use tracing::trace;
use ureq::http::{HeaderName, HeaderValue};

/// Upper bound for a whole request, connect to last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `Transport` over a blocking `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || call(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn call(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    trace!(method = request.method.as_str(), url = %request.url, "sending request");
    let headers = &request.headers;
    let result = match (request.method, request.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(&request.url), headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&request.url), headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&request.url), headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&request.url), headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            with_headers(agent.patch(&request.url), headers).send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => with_headers(agent.patch(&request.url), headers).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| header_entry(name, value))
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Header values are bytes on the wire; non-UTF-8 ones are kept lossily.
fn header_entry(name: &HeaderName, value: &HeaderValue) -> (String, String) {
    (
        name.as_str().to_string(),
        String::from_utf8_lossy(value.as_bytes()).into_owned(),
    )
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Run `app` to completion on a fresh current-thread runtime.
///
/// The runtime is shut down in the background afterwards, so a request
/// still blocked in ureq after teardown does not hold the caller.
pub fn run_app<T, C, F>(app: &mut App<T>, teardown: C, on_render: F) -> io::Result<RunOutcome>
where
    T: Transport,
    C: Future<Output = ()>,
    F: FnMut(&str),
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(app.run(teardown, on_render));
    runtime.shutdown_background();
    Ok(outcome)
}
