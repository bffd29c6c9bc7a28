//! UI/backend events and error modeling for desktop GUI controller.

use search_core::SearchView;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    ViewUpdated(SearchView),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Search,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("api error") {
            UiErrorCategory::Server
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("must start with")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("failed to reach")
            || message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("disconnected")
            || message_lower.contains("no longer running")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Short hint shown under the raw message.
    pub fn hint(&self) -> Option<&'static str> {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => {
                Some("Check api_url in order_search.toml or ORDER_SEARCH_API_URL and relaunch.")
            }
            (_, UiErrorCategory::Transport) => {
                Some("Order service unreachable; check the network and edit the search to retry.")
            }
            (_, UiErrorCategory::Server) => Some("The order service rejected the search."),
            _ => None,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
