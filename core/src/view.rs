//! Display component for the fetched payload.
//!
//! # Design
//! `TodoView` is a small state machine with no I/O of its own. `mount`
//! hands out a single `FetchTicket`; the outcome of the one fetch is applied
//! by consuming that ticket, so a mount can change the state at most once.
//! After `unmount` a late outcome is dropped instead of applied.
//!
//! What a failed fetch does to the view is decided in exactly one place,
//! the `FailurePolicy` match in `apply`.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::client::Payload;
use crate::error::ApiError;
use crate::stringify::to_js_pretty;

/// Text shown until a payload arrives.
pub const PLACEHOLDER: &str = "Chargement...";

/// Page heading, shown in every state.
pub const HEADING: &str = "Connexion API Go";

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(0);

/// What the page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(Payload),
    /// Only reachable under `FailurePolicy::ShowError`.
    Failed(String),
}

/// What a failed fetch does to the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The error is only logged; the placeholder stays up for good.
    #[default]
    KeepLoading,
    /// Switch to `ViewState::Failed` and render the error.
    ShowError,
}

/// Proof that this mount's fetch has been started. Consumed by
/// `TodoView::apply`, which only honours tickets it issued itself.
#[derive(Debug)]
#[must_use = "the fetch outcome must be applied with this ticket"]
pub struct FetchTicket {
    view: u64,
}

/// Headless page component: holds the view state and renders it.
///
/// Knows nothing about the network. Whoever calls `mount` performs the
/// fetch and hands the outcome back through `apply`.
#[derive(Debug)]
pub struct TodoView {
    id: u64,
    state: ViewState,
    policy: FailurePolicy,
    fetch_started: bool,
    unmounted: bool,
}

impl TodoView {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            id: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
            state: ViewState::Loading,
            policy,
            fetch_started: false,
            unmounted: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn is_mounted(&self) -> bool {
        self.fetch_started && !self.unmounted
    }

    /// Start of the component's life. Returns the ticket for its one fetch
    /// on the first call, `None` on every later call or after teardown.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        if self.fetch_started || self.unmounted {
            return None;
        }
        self.fetch_started = true;
        Some(FetchTicket { view: self.id })
    }

    pub fn unmount(&mut self) {
        self.unmounted = true;
    }

    /// Apply the outcome of the mount's fetch. Returns `true` when the
    /// state changed and the view needs re-rendering.
    pub fn apply(&mut self, ticket: FetchTicket, outcome: Result<Payload, ApiError>) -> bool {
        if ticket.view != self.id {
            debug!(ticket = ticket.view, view = self.id, "ticket issued by another view, ignoring");
            return false;
        }
        if self.unmounted {
            debug!(ok = outcome.is_ok(), "view torn down, discarding fetch outcome");
            return false;
        }
        match (outcome, self.policy) {
            (Ok(payload), _) => {
                self.state = ViewState::Loaded(payload);
                true
            }
            (Err(_), FailurePolicy::KeepLoading) => false,
            (Err(err), FailurePolicy::ShowError) => {
                self.state = ViewState::Failed(err.to_string());
                true
            }
        }
    }

    /// The visible text of the current state, unescaped.
    pub fn render_text(&self) -> String {
        match &self.state {
            ViewState::Loading => PLACEHOLDER.to_string(),
            ViewState::Loaded(payload) => to_js_pretty(payload),
            ViewState::Failed(message) => format!("Erreur : {message}"),
        }
    }

    /// The full HTML document for the current state.
    pub fn render(&self) -> String {
        let content = match &self.state {
            ViewState::Loading => format!("<p>{}</p>", escape_html(PLACEHOLDER)),
            ViewState::Loaded(_) => format!("<pre>{}</pre>", escape_html(&self.render_text())),
            ViewState::Failed(_) => {
                format!("<p role=\"alert\">{}</p>", escape_html(&self.render_text()))
            }
        };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Todos</title>\n</head>\n<body>\n<div>\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape_html(HEADING));
        let _ = writeln!(html, "{content}");
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

impl Default for TodoView {
    fn default() -> Self {
        Self::new(FailurePolicy::default())
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
