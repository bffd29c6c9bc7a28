//! Query-state and pagination core of the order search front ends.
//!
//! [`session::spawn_search_session`] is the entry point: it runs a
//! [`orchestrator::SearchOrchestrator`] on a tokio task, debounces edits into
//! requests against an [`transport::OrderTransport`] and publishes
//! [`orchestrator::SearchView`] snapshots for rendering.

pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod orchestrator;
pub mod pagination;
pub mod session;
pub mod transport;

pub use controller::{Phase, DEBOUNCE_WINDOW};
pub use draft::{DraftOption, FilterDraft};
pub use error::{SessionError, TransportError};
pub use orchestrator::{FilterEditorView, SearchCommand, SearchView};
pub use pagination::{paginate, Paginator, ORDERS_PER_PAGE};
pub use session::{spawn_search_session, SearchHandle, SessionSettings};
pub use transport::{HttpOrderTransport, OrderTransport};
