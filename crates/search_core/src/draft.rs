//! Uncommitted filter edits made while the filter editor is open.

use serde::Serialize;
use shared::{
    catalog::{search_options, LocationOption},
    domain::{Filters, LocationCategory},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftOption {
    pub name: &'static str,
    pub code: &'static str,
    pub selected: bool,
}

/// A working copy of the committed filters.
///
/// The draft owns its own `Filters` value; nothing done here is visible to
/// the committed filters until the caller applies `confirm()` or `reset()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    committed: Filters,
    draft: Filters,
    active: LocationCategory,
    origin_search: String,
    destination_search: String,
}

impl FilterDraft {
    pub fn open(committed: &Filters) -> Self {
        Self {
            committed: committed.clone(),
            draft: committed.clone(),
            active: LocationCategory::Origin,
            origin_search: String::new(),
            destination_search: String::new(),
        }
    }

    pub fn draft(&self) -> &Filters {
        &self.draft
    }

    pub fn toggle(&mut self, category: LocationCategory, code: &str) {
        self.draft.toggle(category, code);
    }

    /// Toggle addressed by category name; unknown names are ignored.
    pub fn toggle_named(&mut self, category: &str, code: &str) {
        if let Some(category) = LocationCategory::parse(category) {
            self.toggle(category, code);
        }
    }

    pub fn is_selected(&self, category: LocationCategory, code: &str) -> bool {
        self.draft.contains(category, code)
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    /// The empty filter value. The caller still has to commit it.
    pub fn reset(&self) -> Filters {
        Filters::empty()
    }

    pub fn confirm(self) -> Filters {
        self.draft
    }

    pub fn active_category(&self) -> LocationCategory {
        self.active
    }

    pub fn select_category(&mut self, category: LocationCategory) {
        self.active = category;
    }

    pub fn search_text(&self, category: LocationCategory) -> &str {
        match category {
            LocationCategory::Origin => &self.origin_search,
            LocationCategory::Destination => &self.destination_search,
        }
    }

    pub fn set_search_text(&mut self, category: LocationCategory, text: impl Into<String>) {
        let text = text.into();
        match category {
            LocationCategory::Origin => self.origin_search = text,
            LocationCategory::Destination => self.destination_search = text,
        }
    }

    pub fn visible_options(&self, category: LocationCategory) -> Vec<DraftOption> {
        search_options(category, self.search_text(category))
            .into_iter()
            .map(|LocationOption { name, code }| DraftOption {
                name,
                code,
                selected: self.is_selected(category, code),
            })
            .collect()
    }

    pub fn selected_count(&self, category: LocationCategory) -> usize {
        self.draft.selected_count(category)
    }

    pub fn can_apply(&self) -> bool {
        self.is_dirty()
    }

    pub fn can_reset(&self) -> bool {
        !self.draft.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
