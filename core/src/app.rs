//! Drives a `TodoView` through one mount.
//!
//! `App::run` renders the placeholder right away, then races the single
//! fetch against a teardown signal. Everything runs inside one future, so
//! the view state needs no locking.

use std::future::Future;

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::http::Transport;
use crate::view::{FailurePolicy, TodoView};

/// How a call to `App::run` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The fetch succeeded and the payload is displayed.
    Loaded,
    /// The fetch failed; what is displayed depends on the `FailurePolicy`.
    Failed,
    /// Teardown won the race; the fetch was dropped.
    Unmounted,
    /// The view had already been mounted. Nothing was fetched.
    AlreadyMounted,
}

/// A `TodoView` together with the client that feeds it.
#[derive(Debug)]
pub struct App<T> {
    client: ApiClient<T>,
    view: TodoView,
}

impl<T: Transport> App<T> {
    pub fn new(client: ApiClient<T>, policy: FailurePolicy) -> Self {
        Self {
            client,
            view: TodoView::new(policy),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn view(&self) -> &TodoView {
        &self.view
    }

    /// Render the current state without touching the network.
    pub fn rerender<F: FnMut(&str)>(&self, mut on_render: F) {
        on_render(&self.view.render());
    }

    /// Mount the view and see its one fetch through.
    ///
    /// `on_render` receives the placeholder document immediately and the
    /// new document after every state change. If `teardown` resolves first
    /// the view is unmounted and the pending fetch is dropped.
    pub async fn run<C, F>(&mut self, teardown: C, mut on_render: F) -> RunOutcome
    where
        C: Future<Output = ()>,
        F: FnMut(&str),
    {
        let Some(ticket) = self.view.mount() else {
            debug!("view already mounted, not fetching again");
            return RunOutcome::AlreadyMounted;
        };
        on_render(&self.view.render());

        let outcome = tokio::select! {
            outcome = self.client.fetch_data() => Some(outcome),
            () = teardown => None,
        };
        let Some(outcome) = outcome else {
            self.view.unmount();
            info!("view unmounted before the fetch settled");
            return RunOutcome::Unmounted;
        };

        let failed = outcome.is_err();
        if self.view.apply(ticket, outcome) {
            on_render(&self.view.render());
        }
        if failed {
            RunOutcome::Failed
        } else {
            RunOutcome::Loaded
        }
    }
}
