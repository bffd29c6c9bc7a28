use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{SearchRequest, SearchResponse};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

/// The request/response collaborator that runs an order search.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn search_orders(&self, request: &SearchRequest)
        -> Result<SearchResponse, TransportError>;
}

/// POSTs the search body as JSON to a fixed endpoint.
pub struct HttpOrderTransport {
    http: Client,
    endpoint: Url,
}

impl HttpOrderTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderTransport for HttpOrderTransport {
    async fn search_orders(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, TransportError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(TransportError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        let body: SearchResponse = res
            .json()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        debug!(
            endpoint = %self.endpoint,
            orders = body.order_list.as_ref().map(Vec::len).unwrap_or(0),
            "search: decoded response"
        );
        Ok(body)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
