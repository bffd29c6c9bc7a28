use serde::{Deserialize, Serialize};

use crate::domain::{Filters, Order};

/// Every known order status; the search always spans all of them.
pub const ORDER_STATUS_SCOPE: [u8; 5] = [0, 1, 2, 3, 4];

/// Results are paged locally, so the server is always asked for page one.
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub order_status: Vec<u8>,
    pub origin_code: Vec<String>,
    pub destination_code: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    pub filter: SearchFilter,
    pub page: u32,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>, filters: &Filters) -> Self {
        Self {
            keyword: keyword.into(),
            filter: SearchFilter {
                order_status: ORDER_STATUS_SCOPE.to_vec(),
                origin_code: filters.origin_codes.iter().cloned().collect(),
                destination_code: filters.destination_codes.iter().cloned().collect(),
            },
            page: FIRST_PAGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_do: Option<Vec<StatusSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_list: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl SearchResponse {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            order_list: Some(orders),
            ..Self::default()
        }
    }

    /// The matched orders; an absent or null `order_list` means no matches.
    pub fn into_orders(self) -> Vec<Order> {
        self.order_list.unwrap_or_default()
    }
}
