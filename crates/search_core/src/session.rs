//! Async driver for [`SearchOrchestrator`].
//!
//! The session is a single tokio task that owns all search state. It reacts
//! to three kinds of input, one at a time: user commands, debounce timer
//! expiry and request completion. After every visible change it publishes a
//! fresh [`SearchView`] on a watch channel.

use std::{sync::Arc, time::Duration};

use shared::protocol::SearchResponse;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    controller::{DebounceTicket, RequestTicket, DEBOUNCE_WINDOW},
    error::{SessionError, TransportError},
    orchestrator::{Effect, SearchCommand, SearchOrchestrator, SearchView},
    pagination::ORDERS_PER_PAGE,
    transport::OrderTransport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub debounce: Duration,
    pub page_size: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_WINDOW,
            page_size: ORDERS_PER_PAGE,
        }
    }
}

enum SessionEvent {
    DebounceElapsed(DebounceTicket),
    Response {
        ticket: RequestTicket,
        result: Result<SearchResponse, TransportError>,
    },
}

/// Front-end side of a running search session.
///
/// The session stops once every handle has been dropped.
#[derive(Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<SearchCommand>,
    view: watch::Receiver<SearchView>,
}

impl SearchHandle {
    pub fn send(&self, command: SearchCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed)
    }

    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    /// Waits for the first published view (the current one included) that
    /// satisfies `predicate`.
    pub async fn wait_until(
        &self,
        mut predicate: impl FnMut(&SearchView) -> bool,
    ) -> Result<SearchView, SessionError> {
        let mut view = self.view.clone();
        let found = view
            .wait_for(|current| predicate(current))
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(found.clone())
    }
}

/// Starts a session on the current tokio runtime. The initial unfiltered
/// search is armed right away.
pub fn spawn_search_session(
    transport: Arc<dyn OrderTransport>,
    settings: SessionSettings,
) -> SearchHandle {
    let orchestrator = SearchOrchestrator::new(settings.page_size);
    let (view_tx, view_rx) = watch::channel(orchestrator.view());
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let session = SearchSession {
        orchestrator,
        transport,
        debounce: settings.debounce,
        events_tx,
        debounce_task: None,
        view_tx,
    };
    tokio::spawn(session.run(commands_rx, events_rx));

    SearchHandle {
        commands: commands_tx,
        view: view_rx,
    }
}

struct SearchSession {
    orchestrator: SearchOrchestrator,
    transport: Arc<dyn OrderTransport>,
    debounce: Duration,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    debounce_task: Option<JoinHandle<()>>,
    view_tx: watch::Sender<SearchView>,
}

impl SearchSession {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SearchCommand>,
        mut events: mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        info!(
            debounce_ms = self.debounce.as_millis() as u64,
            page_size = self.orchestrator.paginator().page_size(),
            "search: session started"
        );
        let effect = self.orchestrator.start();
        self.handle_effect(effect);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        debug!(?command, "search: command received");
                        let effect = self.orchestrator.apply(command);
                        self.handle_effect(effect);
                    }
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
        }

        if let Some(task) = self.debounce_task.take() {
            task.abort();
        }
        info!("search: session stopped");
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Render => self.publish(),
            Effect::Debounce(ticket) => {
                self.arm_debounce(ticket);
                self.publish();
            }
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::DebounceElapsed(ticket) => {
                if let Some((request_ticket, request)) = self.orchestrator.debounce_elapsed(ticket)
                {
                    debug!(seq = request_ticket.seq(), "search: request dispatched");
                    let transport = Arc::clone(&self.transport);
                    let events_tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = transport.search_orders(&request).await;
                        let _ = events_tx.send(SessionEvent::Response {
                            ticket: request_ticket,
                            result,
                        });
                    });
                    self.publish();
                }
            }
            SessionEvent::Response { ticket, result } => {
                let effect = self.orchestrator.complete(ticket, result);
                self.handle_effect(effect);
            }
        }
    }

    /// Replaces the pending timer; only the newest edit may fire.
    fn arm_debounce(&mut self, ticket: DebounceTicket) {
        if let Some(task) = self.debounce_task.take() {
            task.abort();
        }
        let events_tx = self.events_tx.clone();
        let delay = self.debounce;
        self.debounce_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events_tx.send(SessionEvent::DebounceElapsed(ticket));
        }));
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.orchestrator.view());
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
