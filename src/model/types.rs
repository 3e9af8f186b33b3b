//! Core UI type definitions

use std::time::Instant;

use super::route::ViewKind;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Library,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Library,
            ActiveSection::Library => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MainContent,
            ActiveSection::Library => ActiveSection::Search,
            ActiveSection::MainContent => ActiveSection::Library,
        }
    }
}

/// An entry in the Library sidebar
#[derive(Clone, Debug)]
pub struct LibraryItem {
    pub name: String,
    pub kind: ViewKind,
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub library_items: Vec<LibraryItem>,
    pub library_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    /// Short confirmation shown in the status line ("Added to playlist")
    pub notice: Option<String>,
    pub notice_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    /// Text being edited in the filter editor, if it is open
    pub filter_input: Option<String>,
    pub filter_error: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::MainContent,
            search_query: String::new(),
            library_items: ViewKind::ALL
                .into_iter()
                .map(|kind| LibraryItem {
                    name: kind.title().to_string(),
                    kind,
                })
                .collect(),
            library_selected: 0,
            error_message: None,
            error_timestamp: None,
            notice: None,
            notice_timestamp: None,
            show_help_popup: false,
            filter_input: None,
            filter_error: None,
        }
    }
}
