//! Backend commands queued from UI to backend worker.

use search_core::SearchCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Search(SearchCommand),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Search(command) => match command {
                SearchCommand::SetKeyword(_) => "set_keyword",
                SearchCommand::ClearKeyword => "clear_keyword",
                SearchCommand::OpenFilters => "open_filters",
                SearchCommand::CloseFilters => "close_filters",
                SearchCommand::SelectFilterCategory(_) => "select_filter_category",
                SearchCommand::SetFilterSearch { .. } => "set_filter_search",
                SearchCommand::ToggleFilter { .. } => "toggle_filter",
                SearchCommand::ApplyFilters => "apply_filters",
                SearchCommand::ResetFilters => "reset_filters",
                SearchCommand::ChangePage(_) => "change_page",
                SearchCommand::NextPage => "next_page",
                SearchCommand::PreviousPage => "previous_page",
            },
            BackendCommand::Shutdown => "shutdown",
        }
    }
}

impl From<SearchCommand> for BackendCommand {
    fn from(command: SearchCommand) -> Self {
        BackendCommand::Search(command)
    }
}
