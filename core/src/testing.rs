//! Scripted transports and log capture shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

type Outcome = Result<HttpResponse, ApiError>;

/// Replays queued outcomes in order; the last one repeats forever.
#[derive(Debug)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn sequence(outcomes: Vec<Outcome>) -> Self {
        assert!(!outcomes.is_empty());
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(status: u16, body: &str) -> Self {
        Self::sequence(vec![Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })])
    }

    pub fn err(err: ApiError) -> Self {
        Self::sequence(vec![Err(err)])
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.pop_front().unwrap()
        } else {
            outcomes.front().cloned().unwrap()
        }
    }
}

/// Holds every request until `release` is called.
#[derive(Debug)]
pub struct GatedTransport {
    pub inner: ScriptedTransport,
    gate: Arc<Notify>,
}

impl GatedTransport {
    pub fn new(inner: ScriptedTransport) -> Self {
        Self {
            inner,
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.gate.notified().await;
        self.inner.execute(request).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorCount(Arc<AtomicUsize>);

impl ErrorCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCount {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Counts `ERROR` events on the current thread while the guard lives.
pub fn error_counter() -> (ErrorCount, DefaultGuard) {
    let count = ErrorCount::default();
    let subscriber = tracing_subscriber::registry().with(count.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (count, guard)
}
