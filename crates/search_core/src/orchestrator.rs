//! Composition of the query controller, the paginator and the filter editor.

use serde::Serialize;
use shared::{
    domain::{Filters, LocationCategory, Order},
    protocol::{SearchRequest, SearchResponse},
};
use tracing::debug;

use crate::{
    controller::{DebounceTicket, Phase, QueryController, RequestTicket},
    draft::{DraftOption, FilterDraft},
    error::TransportError,
    pagination::Paginator,
};

/// A user intent fed into the search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    SetKeyword(String),
    ClearKeyword,
    OpenFilters,
    CloseFilters,
    SelectFilterCategory(LocationCategory),
    SetFilterSearch {
        category: LocationCategory,
        text: String,
    },
    ToggleFilter {
        category: LocationCategory,
        code: String,
    },
    ApplyFilters,
    ResetFilters,
    ChangePage(usize),
    NextPage,
    PreviousPage,
}

/// What the driver has to do after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Render,
    Debounce(DebounceTicket),
}

impl From<Option<DebounceTicket>> for Effect {
    fn from(ticket: Option<DebounceTicket>) -> Self {
        ticket.map(Effect::Debounce).unwrap_or(Effect::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEditorView {
    pub active: LocationCategory,
    pub search_text: String,
    pub options: Vec<DraftOption>,
    pub origin_selected: usize,
    pub destination_selected: usize,
    pub can_apply: bool,
    pub can_reset: bool,
}

/// Everything a front end needs to draw the search screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub keyword: String,
    pub filters: Filters,
    pub phase: Phase,
    pub loading: bool,
    pub error: Option<String>,
    pub orders: Vec<Order>,
    pub total_orders: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub filter_editor: Option<FilterEditorView>,
}

impl SearchView {
    pub fn pagination_visible(&self) -> bool {
        !self.loading && self.error.is_none() && !self.orders.is_empty()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.origin_codes.len() + self.filters.destination_codes.len()
    }
}

#[derive(Debug)]
pub struct SearchOrchestrator {
    controller: QueryController,
    paginator: Paginator,
    editor: Option<FilterDraft>,
}

impl SearchOrchestrator {
    pub fn new(page_size: usize) -> Self {
        Self {
            controller: QueryController::new(),
            paginator: Paginator::new(page_size),
            editor: None,
        }
    }

    pub fn controller(&self) -> &QueryController {
        &self.controller
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn editor(&self) -> Option<&FilterDraft> {
        self.editor.as_ref()
    }

    pub fn start(&mut self) -> Effect {
        Effect::Debounce(self.controller.start())
    }

    pub fn apply(&mut self, command: SearchCommand) -> Effect {
        match command {
            SearchCommand::SetKeyword(keyword) => self.controller.set_keyword(keyword).into(),
            SearchCommand::ClearKeyword => self.controller.clear_keyword().into(),
            SearchCommand::OpenFilters => {
                self.editor = Some(FilterDraft::open(&self.controller.query().filters));
                Effect::Render
            }
            SearchCommand::CloseFilters => match self.editor.take() {
                Some(_) => Effect::Render,
                None => Effect::None,
            },
            SearchCommand::SelectFilterCategory(category) => {
                self.edit_draft(|draft| draft.select_category(category))
            }
            SearchCommand::SetFilterSearch { category, text } => {
                self.edit_draft(|draft| draft.set_search_text(category, text))
            }
            SearchCommand::ToggleFilter { category, code } => {
                self.edit_draft(|draft| draft.toggle(category, &code))
            }
            SearchCommand::ApplyFilters => match self.editor.take() {
                Some(draft) => self.commit(draft.confirm()),
                None => Effect::None,
            },
            SearchCommand::ResetFilters => {
                let empty = match self.editor.take() {
                    Some(draft) => draft.reset(),
                    None => Filters::empty(),
                };
                self.commit(empty)
            }
            SearchCommand::ChangePage(page) => self.page_effect(page, |p| p.change_page(page)),
            SearchCommand::NextPage => {
                let page = self.paginator.current_page() + 1;
                self.page_effect(page, Paginator::next_page)
            }
            SearchCommand::PreviousPage => {
                let page = self.paginator.current_page().saturating_sub(1);
                self.page_effect(page, Paginator::previous_page)
            }
        }
    }

    fn edit_draft(&mut self, edit: impl FnOnce(&mut FilterDraft)) -> Effect {
        match self.editor.as_mut() {
            Some(draft) => {
                edit(draft);
                Effect::Render
            }
            None => Effect::None,
        }
    }

    // Closing the editor always needs a redraw, even when the filters are
    // unchanged and no fetch follows.
    fn commit(&mut self, filters: Filters) -> Effect {
        match self.controller.commit_filters(filters) {
            Some(ticket) => Effect::Debounce(ticket),
            None => Effect::Render,
        }
    }

    fn page_effect(
        &mut self,
        requested: usize,
        change: impl FnOnce(&mut Paginator) -> bool,
    ) -> Effect {
        if change(&mut self.paginator) {
            Effect::Render
        } else {
            debug!(
                requested,
                total_pages = self.paginator.total_pages(),
                "search: page request out of range"
            );
            Effect::None
        }
    }

    pub fn debounce_elapsed(
        &mut self,
        ticket: DebounceTicket,
    ) -> Option<(RequestTicket, SearchRequest)> {
        self.controller.debounce_elapsed(ticket)
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<SearchResponse, TransportError>,
    ) -> Effect {
        if !self.controller.complete(ticket, result).applied() {
            return Effect::None;
        }
        self.paginator.reset(self.controller.results().items.len());
        Effect::Render
    }

    /// Re-derives the visible page from the current result set.
    pub fn view(&self) -> SearchView {
        let query = self.controller.query();
        let results = self.controller.results();
        let page = self.paginator.slice(&results.items);

        SearchView {
            keyword: query.keyword.clone(),
            filters: query.filters.clone(),
            phase: self.controller.phase(),
            loading: results.loading,
            error: results.error.clone(),
            orders: page.items.to_vec(),
            total_orders: results.items.len(),
            current_page: page.number,
            total_pages: page.total_pages,
            has_previous: page.number > 1,
            has_next: page.number < page.total_pages,
            filter_editor: self.editor.as_ref().map(editor_view),
        }
    }
}

fn editor_view(draft: &FilterDraft) -> FilterEditorView {
    let active = draft.active_category();
    FilterEditorView {
        active,
        search_text: draft.search_text(active).to_string(),
        options: draft.visible_options(active),
        origin_selected: draft.selected_count(LocationCategory::Origin),
        destination_selected: draft.selected_count(LocationCategory::Destination),
        can_apply: draft.can_apply(),
        can_reset: draft.can_reset(),
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
