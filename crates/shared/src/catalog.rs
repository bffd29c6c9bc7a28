//! Static origin/destination catalog offered by the filter editor.

use serde::Serialize;

use crate::domain::LocationCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationOption {
    pub name: &'static str,
    pub code: &'static str,
}

const fn option(name: &'static str, code: &'static str) -> LocationOption {
    LocationOption { name, code }
}

pub const ORIGIN_OPTIONS: &[LocationOption] = &[
    option("BANDUNG", "BDG"),
    option("JAKARTA", "JKT"),
    option("SURABAYA", "SBY"),
    option("DENPASAR", "DPS"),
    option("MALANG", "MLG"),
];

pub const DESTINATION_OPTIONS: &[LocationOption] = &[
    option("MEDAN", "MDN"),
    option("BANJARMASIN", "BJM"),
    option("PEKANBARU", "PKU"),
    option("PALEMBANG", "PLB"),
    option("BALIKPAPAN", "BPN"),
];

pub fn options_for(category: LocationCategory) -> &'static [LocationOption] {
    match category {
        LocationCategory::Origin => ORIGIN_OPTIONS,
        LocationCategory::Destination => DESTINATION_OPTIONS,
    }
}

/// Case-insensitive substring match on option names, in catalog order.
pub fn search_options(category: LocationCategory, text: &str) -> Vec<LocationOption> {
    let needle = text.to_lowercase();
    options_for(category)
        .iter()
        .filter(|opt| opt.name.to_lowercase().contains(&needle))
        .copied()
        .collect()
}
