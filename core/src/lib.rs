//! Client core for the todo viewer.
//!
//! # Overview
//! Fetches the todo collection from the API once and renders the raw
//! response as pretty-printed JSON inside an HTML document. The crate never
//! opens a socket itself: the network round-trip goes through a `Transport`
//! supplied by the caller, so every piece can be driven deterministically
//! in tests.
//!
//! # Design
//! - `ApiClient` holds a fixed `ClientConfig` (base address plus the
//!   `Content-Type: application/json` header) and exposes `fetch_data`.
//! - `TodoView` is the display state machine: `Loading` until the one
//!   fetch succeeds, then `Loaded(payload)`. A failure keeps the
//!   placeholder unless `FailurePolicy::ShowError` is chosen.
//! - `App` wires the two together and handles teardown while the fetch is
//!   still pending.
//! - The payload is an opaque `serde_json::Value`, rendered with the
//!   browser's `JSON.stringify` layout (`stringify`).

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod stringify;
pub mod view;

#[cfg(test)]
mod testing;

pub use app::{App, RunOutcome};
pub use client::{ApiClient, Payload, TODOS_PATH};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use view::{FailurePolicy, FetchTicket, TodoView, ViewState, PLACEHOLDER};
