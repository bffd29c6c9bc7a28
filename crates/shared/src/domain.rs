use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

/// A delivery order as returned by the search endpoint.
///
/// Only `do_id` is required; missing display fields read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "do_id")]
    pub id: OrderId,
    #[serde(default)]
    pub goods_name: String,
    #[serde(default)]
    pub origin_name: String,
    #[serde(default)]
    pub destination_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    Origin,
    Destination,
}

impl LocationCategory {
    pub const ALL: [LocationCategory; 2] = [LocationCategory::Origin, LocationCategory::Destination];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "origin" => Some(Self::Origin),
            "destination" => Some(Self::Destination),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Origin => "Origin",
            Self::Destination => "Destination",
        }
    }
}

/// Origin/destination code selections.
///
/// Codes are kept in ordered sets so equality is membership-based and the
/// wire order is stable regardless of the order codes were picked in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub origin_codes: BTreeSet<String>,
    pub destination_codes: BTreeSet<String>,
}

impl Filters {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn codes(&self, category: LocationCategory) -> &BTreeSet<String> {
        match category {
            LocationCategory::Origin => &self.origin_codes,
            LocationCategory::Destination => &self.destination_codes,
        }
    }

    fn codes_mut(&mut self, category: LocationCategory) -> &mut BTreeSet<String> {
        match category {
            LocationCategory::Origin => &mut self.origin_codes,
            LocationCategory::Destination => &mut self.destination_codes,
        }
    }

    pub fn contains(&self, category: LocationCategory, code: &str) -> bool {
        self.codes(category).contains(code)
    }

    /// Adds the code if absent, removes it otherwise. Returns whether the code
    /// is selected afterwards.
    pub fn toggle(&mut self, category: LocationCategory, code: &str) -> bool {
        let codes = self.codes_mut(category);
        if codes.remove(code) {
            false
        } else {
            codes.insert(code.to_string());
            true
        }
    }

    pub fn with(mut self, category: LocationCategory, code: &str) -> Self {
        self.codes_mut(category).insert(code.to_string());
        self
    }

    pub fn selected_count(&self, category: LocationCategory) -> usize {
        self.codes(category).len()
    }

    pub fn is_empty(&self) -> bool {
        self.origin_codes.is_empty() && self.destination_codes.is_empty()
    }
}
