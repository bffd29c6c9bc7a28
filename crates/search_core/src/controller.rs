//! Committed query state and the debounce / request sequencing around it.
//!
//! The controller never sleeps and never performs I/O. Edits hand out a
//! [`DebounceTicket`]; the driver arms a timer for it and reports back with
//! [`QueryController::debounce_elapsed`]. Issued requests carry a
//! [`RequestTicket`] and only the latest one may touch the result set.

use std::time::Duration;

use serde::Serialize;
use shared::{
    domain::{Filters, Order},
    protocol::{SearchRequest, SearchResponse},
};
use tracing::{debug, info, warn};

use crate::error::TransportError;

pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Debouncing,
    Fetching,
    Success,
    Failed,
}

/// Generation of the debounce timer an edit armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Sequence number assigned to an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub keyword: String,
    pub filters: Filters,
}

impl Query {
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::new(self.keyword.clone(), &self.filters)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub items: Vec<Order>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Succeeded,
    Failed,
    Superseded,
}

impl ResponseOutcome {
    pub fn applied(self) -> bool {
        !matches!(self, Self::Superseded)
    }
}

#[derive(Debug)]
pub struct QueryController {
    query: Query,
    results: ResultSet,
    phase: Phase,
    debounce_generation: u64,
    latest_request: u64,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryController {
    pub fn new() -> Self {
        Self {
            query: Query::default(),
            results: ResultSet::default(),
            phase: Phase::Idle,
            debounce_generation: 0,
            latest_request: 0,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Arms the initial fetch of the unfiltered list.
    pub fn start(&mut self) -> DebounceTicket {
        self.restart_debounce()
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) -> Option<DebounceTicket> {
        let keyword = keyword.into();
        if keyword == self.query.keyword {
            return None;
        }
        self.query.keyword = keyword;
        Some(self.restart_debounce())
    }

    pub fn clear_keyword(&mut self) -> Option<DebounceTicket> {
        self.set_keyword(String::new())
    }

    pub fn commit_filters(&mut self, filters: Filters) -> Option<DebounceTicket> {
        if filters == self.query.filters {
            return None;
        }
        self.query.filters = filters;
        Some(self.restart_debounce())
    }

    fn restart_debounce(&mut self) -> DebounceTicket {
        self.debounce_generation += 1;
        self.phase = Phase::Debouncing;
        debug!(
            generation = self.debounce_generation,
            keyword = %self.query.keyword,
            "search: debounce restarted"
        );
        DebounceTicket(self.debounce_generation)
    }

    /// Turns the timer of the latest edit into a request. Tickets from
    /// replaced timers yield `None`.
    pub fn debounce_elapsed(
        &mut self,
        ticket: DebounceTicket,
    ) -> Option<(RequestTicket, SearchRequest)> {
        if ticket.0 != self.debounce_generation || self.phase != Phase::Debouncing {
            debug!(
                generation = ticket.0,
                current_generation = self.debounce_generation,
                "search: ignoring stale debounce timer"
            );
            return None;
        }

        self.latest_request += 1;
        self.phase = Phase::Fetching;
        self.results.loading = true;
        self.results.error = None;

        let request = self.query.to_request();
        info!(
            seq = self.latest_request,
            keyword = %request.keyword,
            origin_codes = request.filter.origin_code.len(),
            destination_codes = request.filter.destination_code.len(),
            "search: issuing order search"
        );
        Some((RequestTicket(self.latest_request), request))
    }

    /// Applies the outcome of a request unless a newer request has been
    /// issued since.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<SearchResponse, TransportError>,
    ) -> ResponseOutcome {
        if ticket.0 != self.latest_request {
            debug!(
                seq = ticket.0,
                latest_seq = self.latest_request,
                "search: discarding superseded response"
            );
            return ResponseOutcome::Superseded;
        }

        // A newer edit may already be debouncing; it keeps its phase.
        let settles = self.phase == Phase::Fetching;
        self.results.loading = false;

        match result {
            Ok(response) => {
                self.results.items = response.into_orders();
                self.results.error = None;
                if settles {
                    self.phase = Phase::Success;
                }
                info!(
                    seq = ticket.0,
                    orders = self.results.items.len(),
                    "search: results received"
                );
                ResponseOutcome::Succeeded
            }
            Err(err) => {
                warn!(seq = ticket.0, error = %err, "search: order search failed");
                self.results.items.clear();
                self.results.error = Some(err.to_string());
                if settles {
                    self.phase = Phase::Failed;
                }
                ResponseOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
