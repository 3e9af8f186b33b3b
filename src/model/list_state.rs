//! Per-view list state: pagination, sorting, search and filters, plus the
//! bookkeeping that decides which load response is allowed to land.
//!
//! Every mutation goes through [`ListState::apply`], which reports whether
//! the change requires a reload. Loads are tagged with a [`RequestToken`];
//! only the response for the most recently issued token is applied.

use super::filters::Filters;
use super::pagination::{Page, PageSize, Pagination};
use super::route::{Location, ViewKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Title,
    Artist,
    Album,
    Duration,
    Year,
    PlayCount,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        Self::Title,
        Self::Artist,
        Self::Album,
        Self::Duration,
        Self::Year,
        Self::PlayCount,
    ];

    pub fn wire(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Duration => "duration",
            Self::Year => "year",
            Self::PlayCount => "playCount",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.wire() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Album => "Album",
            Self::Duration => "Duration",
            Self::Year => "Year",
            Self::PlayCount => "Plays",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn wire(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Identifies one issued load. Tokens are handed out in increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// A user-requested change to the list state
#[derive(Clone, Debug, PartialEq)]
pub enum ListChange {
    Page(u32),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    PageSize(PageSize),
    LargerPageSize,
    SmallerPageSize,
    Sort(SortKey),
    Search(String),
    Filters(Filters),
    ClearFilters,
}

/// Everything a loader needs to fetch the current window
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub kind: ViewKind,
    pub window: Pagination,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub search: String,
    pub filters: Filters,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer request was issued after this one; nothing changed
    Stale,
    /// The list shrank below the current page; the page was moved back
    /// and the list should be loaded again
    Clamped,
}

#[derive(Clone, Debug)]
pub struct ListState<T> {
    pub kind: ViewKind,
    pub pagination: Pagination,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub search: String,
    pub filters: Filters,
    pub items: Vec<T>,
    pub selected_index: usize,
    pub loading: bool,
    pub error: Option<String>,
    pending: Option<RequestToken>,
}

impl<T> ListState<T> {
    pub fn new(kind: ViewKind, page_size: PageSize) -> Self {
        Self {
            kind,
            pagination: Pagination {
                page: 1,
                page_size,
                total: 0,
            },
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            search: String::new(),
            filters: Filters::default(),
            items: Vec::new(),
            selected_index: 0,
            loading: false,
            error: None,
            pending: None,
        }
    }

    /// Restore state from a location. Parameters that do not apply to the
    /// view or cannot be parsed are ignored.
    pub fn from_location(location: &Location, default_page_size: PageSize) -> Self {
        let kind = location.kind;
        let mut state = Self::new(kind, default_page_size);

        for (key, value) in &location.params {
            let accepted = match key.as_str() {
                "page" => value
                    .parse::<u32>()
                    .ok()
                    .filter(|p| *p >= 1)
                    .map(|p| state.pagination.page = p)
                    .is_some(),
                "pageSize" => value
                    .parse::<u32>()
                    .ok()
                    .and_then(PageSize::from_value)
                    .map(|s| state.pagination.page_size = s)
                    .is_some(),
                "sort" if kind.supports_sort() => SortKey::from_wire(value)
                    .map(|k| state.sort_key = k)
                    .is_some(),
                "order" if kind.supports_sort() => SortOrder::from_wire(value)
                    .map(|o| state.sort_order = o)
                    .is_some(),
                "search" if kind.supports_search() => {
                    state.search = value.trim().to_string();
                    true
                }
                _ if kind.supports_filters() => state.filters.set(key, value).is_ok(),
                _ => false,
            };
            if !accepted {
                tracing::warn!(%location, key, value, "Ignoring location parameter");
            }
        }

        if state.filters.validate().is_err() {
            tracing::warn!(%location, "Ignoring contradictory filters");
            state.filters = Filters::default();
        }
        state
    }

    /// The location that reproduces this state
    pub fn location(&self) -> Location {
        let mut location = Location::new(self.kind)
            .with_param("page", self.pagination.page.to_string())
            .with_param("pageSize", self.pagination.page_size.get().to_string());
        if self.kind.supports_sort() {
            location = location
                .with_param("sort", self.sort_key.wire())
                .with_param("order", self.sort_order.wire());
        }
        if self.kind.supports_search() && !self.search.is_empty() {
            location = location.with_param("search", self.search.clone());
        }
        if self.kind.supports_filters() {
            for (key, value) in self.filters.params() {
                location = location.with_param(key, value);
            }
        }
        location
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            kind: self.kind,
            window: self.pagination,
            sort_key: self.sort_key,
            sort_order: self.sort_order,
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Apply a change; returns `true` when the list must be reloaded.
    pub fn apply(&mut self, change: ListChange) -> bool {
        match change {
            ListChange::Page(page) => self.go_to_page(page),
            ListChange::NextPage => self.go_to_page(self.pagination.page.saturating_add(1)),
            ListChange::PrevPage => self.go_to_page(self.pagination.page.saturating_sub(1)),
            ListChange::FirstPage => self.go_to_page(1),
            ListChange::LastPage => self.go_to_page(self.pagination.last_page()),
            ListChange::PageSize(size) => self.set_page_size(size),
            ListChange::LargerPageSize => self.set_page_size(self.pagination.page_size.larger()),
            ListChange::SmallerPageSize => self.set_page_size(self.pagination.page_size.smaller()),
            ListChange::Sort(key) => self.sort_by(key),
            ListChange::Search(query) => self.set_search(query),
            ListChange::Filters(filters) => self.set_filters(filters),
            ListChange::ClearFilters => self.set_filters(Filters::default()),
        }
    }

    fn go_to_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.pagination.last_page() || page == self.pagination.page {
            return false;
        }
        self.pagination.page = page;
        true
    }

    fn set_page_size(&mut self, size: PageSize) -> bool {
        if size == self.pagination.page_size {
            return false;
        }
        self.pagination.page_size = size;
        self.pagination.page = 1;
        true
    }

    fn sort_by(&mut self, key: SortKey) -> bool {
        if !self.kind.supports_sort() {
            return false;
        }
        if key == self.sort_key {
            self.sort_order = self.sort_order.flip();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Asc;
        }
        true
    }

    fn set_search(&mut self, query: String) -> bool {
        let query = query.trim();
        if !self.kind.supports_search() || query == self.search {
            return false;
        }
        self.search = query.to_string();
        self.pagination.page = 1;
        true
    }

    fn set_filters(&mut self, filters: Filters) -> bool {
        if !self.kind.supports_filters() || filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.pagination.page = 1;
        true
    }

    /// Mark a load as in flight. Supersedes any earlier pending load.
    pub fn begin_load(&mut self, token: RequestToken) {
        self.pending = Some(token);
        self.loading = true;
    }

    pub fn is_pending(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }

    /// Apply the outcome of a load. Failures keep the previous items.
    pub fn finish_load(&mut self, token: RequestToken, result: Result<Page<T>, String>) -> LoadOutcome {
        if !self.is_pending(token) {
            return LoadOutcome::Stale;
        }
        self.pending = None;
        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(message) => {
                self.error = Some(message);
                return LoadOutcome::Failed;
            }
        };

        let previous_page = self.pagination.page;
        self.items = page.items;
        self.error = None;
        self.pagination.total = page.pagination.total;
        self.pagination.page = page.pagination.page.max(1);

        let last_page = self.pagination.last_page();
        if self.pagination.page > last_page {
            self.pagination.page = last_page;
            self.selected_index = 0;
            return LoadOutcome::Clamped;
        }

        if self.pagination.page != previous_page {
            self.selected_index = 0;
        }
        self.clamp_selection();
        LoadOutcome::Applied
    }

    /// Drop matching items from the visible page and shrink the total to
    /// match. Returns `true` when the page emptied out and moved back, in
    /// which case the list should be reloaded.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        let removed = (before - self.items.len()) as u64;
        if removed == 0 {
            return false;
        }

        self.pagination.total = self.pagination.total.saturating_sub(removed);
        self.clamp_selection();

        if self.items.is_empty() && self.pagination.page > 1 {
            self.pagination.page = (self.pagination.page - 1).min(self.pagination.last_page());
            return true;
        }
        false
    }

    pub fn update_where(&mut self, predicate: impl Fn(&T) -> bool, mut update: impl FnMut(&mut T)) {
        self.items
            .iter_mut()
            .filter(|item| predicate(item))
            .for_each(|item| update(item));
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
        }
    }

    /// Move the selection by `delta` rows, stopping at the first or last row
    pub fn move_by(&mut self, delta: isize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        self.selected_index = self.selected_index.saturating_add_signed(delta).min(last);
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selected_index)
    }

    /// One-based position of the item at `index` across all pages
    pub fn item_number(&self, index: usize) -> u64 {
        self.pagination.offset() + index as u64 + 1
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.items.len().saturating_sub(1));
    }
}
