//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::content::{ContentState, ContentView};
use super::filters::Filters;
use super::list_state::{ListChange, ListQuery, LoadOutcome, RequestToken};
use super::pagination::{Page, PageSize};
use super::route::{Location, ViewKind};
use super::track::{Artist, Track};
use super::types::{ActiveSection, UiState};

/// Main application model containing all UI and content state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
    default_page_size: PageSize,
    error_display: Duration,
}

impl AppModel {
    pub fn new(default_page_size: PageSize, error_display: Duration) -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
            default_page_size,
            error_display,
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn library_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        state.library_selected = state.library_selected.saturating_sub(1);
    }

    pub async fn library_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        if state.library_selected + 1 < state.library_items.len() {
            state.library_selected += 1;
        }
    }

    pub async fn selected_library_kind(&self) -> Option<ViewKind> {
        let state = self.ui_state.lock().await;
        state.library_items.get(state.library_selected).map(|item| item.kind)
    }

    pub async fn append_to_search(&self, c: char) {
        self.ui_state.lock().await.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        self.ui_state.lock().await.search_query.pop();
    }

    pub async fn get_search_query(&self) -> String {
        self.ui_state.lock().await.search_query.clone()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn set_notice(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.notice = Some(message);
        state.notice_timestamp = Some(Instant::now());
    }

    /// Drop the error overlay and status notice once they have been shown
    /// long enough
    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if state.error_timestamp.is_some_and(|t| t.elapsed() > self.error_display) {
            state.error_message = None;
            state.error_timestamp = None;
        }
        if state.notice_timestamp.is_some_and(|t| t.elapsed() > self.error_display) {
            state.notice = None;
            state.notice_timestamp = None;
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Filter editor
    // ========================================================================

    /// Open the filter editor prefilled with the current filters. Only the
    /// music list has filters.
    pub async fn open_filter_editor(&self) -> bool {
        let current = {
            let content = self.content_state.lock().await;
            match &content.view {
                ContentView::Tracks(list) if list.kind.supports_filters() => list.filters.to_string(),
                _ => return false,
            }
        };
        let mut state = self.ui_state.lock().await;
        state.filter_input = Some(current);
        state.filter_error = None;
        true
    }

    pub async fn is_filter_editor_open(&self) -> bool {
        self.ui_state.lock().await.filter_input.is_some()
    }

    pub async fn filter_input_push(&self, c: char) {
        let mut guard = self.ui_state.lock().await;
        let state = &mut *guard;
        if let Some(input) = state.filter_input.as_mut() {
            input.push(c);
            state.filter_error = None;
        }
    }

    pub async fn filter_input_backspace(&self) {
        let mut guard = self.ui_state.lock().await;
        let state = &mut *guard;
        if let Some(input) = state.filter_input.as_mut() {
            input.pop();
            state.filter_error = None;
        }
    }

    pub async fn close_filter_editor(&self) {
        let mut state = self.ui_state.lock().await;
        state.filter_input = None;
        state.filter_error = None;
    }

    /// Parse the editor text. On success the editor closes; on failure it
    /// stays open showing the problem.
    pub async fn submit_filter_editor(&self) -> Option<Filters> {
        let mut state = self.ui_state.lock().await;
        let parsed = state.filter_input.as_deref()?.parse::<Filters>();
        match parsed {
            Ok(filters) => {
                state.filter_input = None;
                state.filter_error = None;
                Some(filters)
            }
            Err(e) => {
                state.filter_error = Some(e.to_string());
                None
            }
        }
    }

    // ========================================================================
    // Content / list views
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn current_location(&self) -> Option<Location> {
        self.content_state.lock().await.view.location()
    }

    pub async fn current_kind(&self) -> Option<ViewKind> {
        self.content_state.lock().await.view.kind()
    }

    /// Replace the visible view with a fresh one built from `location`. The
    /// previous view goes on the navigation stack.
    pub async fn open_location(&self, location: &Location) {
        self.replace_view(location, true).await;
    }

    /// Open a top-level library view. History starts over from here.
    pub async fn open_library_location(&self, location: &Location) {
        self.replace_view(location, false).await;
    }

    async fn replace_view(&self, location: &Location, keep_history: bool) {
        let view = ContentView::open(location, self.default_page_size);
        let search = match &view {
            ContentView::Tracks(list) => list.search.clone(),
            _ => String::new(),
        };

        {
            let mut content = self.content_state.lock().await;
            let previous = std::mem::replace(&mut content.view, view);
            if !keep_history {
                content.navigation_stack.clear();
            } else if !matches!(previous, ContentView::Empty) {
                content.navigation_stack.push(previous);
            }
        }
        self.sync_ui_with(location.kind, search).await;
    }

    /// Restore the previous view. Returns `false` when there is no history.
    pub async fn navigate_back(&self) -> bool {
        let restored = {
            let mut content = self.content_state.lock().await;
            let Some(previous) = content.navigation_stack.pop() else {
                return false;
            };
            content.view = previous;
            match &content.view {
                ContentView::Tracks(list) => Some((list.kind, list.search.clone())),
                ContentView::Artists(list) => Some((list.kind, String::new())),
                ContentView::Empty => None,
            }
        };
        if let Some((kind, search)) = restored {
            self.sync_ui_with(kind, search).await;
        }
        true
    }

    async fn sync_ui_with(&self, kind: ViewKind, search: String) {
        let mut state = self.ui_state.lock().await;
        if let Some(index) = state.library_items.iter().position(|item| item.kind == kind) {
            state.library_selected = index;
        }
        state.search_query = search;
    }

    /// Apply a list change to the visible view; `true` means reload.
    pub async fn apply_change(&self, change: ListChange) -> bool {
        self.content_state.lock().await.view.apply(change)
    }

    /// Issue a token and mark the visible view as loading
    pub async fn begin_load(&self) -> Option<(RequestToken, ListQuery)> {
        let mut content = self.content_state.lock().await;
        let token = content.issue_token();
        let query = content.view.begin_load(token)?;
        Some((token, query))
    }

    pub async fn finish_track_load(
        &self,
        token: RequestToken,
        result: Result<Page<Track>, String>,
    ) -> LoadOutcome {
        let mut content = self.content_state.lock().await;
        let outcome = match &mut content.view {
            ContentView::Tracks(list) => list.finish_load(token, result),
            _ => LoadOutcome::Stale,
        };
        if outcome == LoadOutcome::Stale {
            tracing::debug!(seq = token.0, "Discarding stale track page");
        }
        outcome
    }

    pub async fn finish_artist_load(
        &self,
        token: RequestToken,
        result: Result<Page<Artist>, String>,
    ) -> LoadOutcome {
        let mut content = self.content_state.lock().await;
        let outcome = match &mut content.view {
            ContentView::Artists(list) => list.finish_load(token, result),
            _ => LoadOutcome::Stale,
        };
        if outcome == LoadOutcome::Stale {
            tracing::debug!(seq = token.0, "Discarding stale artist page");
        }
        outcome
    }

    pub async fn content_move_up(&self) {
        self.content_state.lock().await.view.move_up();
    }

    pub async fn content_move_down(&self) {
        self.content_state.lock().await.view.move_down();
    }

    pub async fn content_move_by(&self, delta: isize) {
        self.content_state.lock().await.view.move_by(delta);
    }

    pub async fn selected_track(&self) -> Option<Track> {
        match &self.content_state.lock().await.view {
            ContentView::Tracks(list) => list.selected().cloned(),
            _ => None,
        }
    }

    pub async fn selected_artist(&self) -> Option<Artist> {
        match &self.content_state.lock().await.view {
            ContentView::Artists(list) => list.selected().cloned(),
            _ => None,
        }
    }

    /// Reflect an acknowledged favorite change in the visible list. On the
    /// favorites view an un-favorited track leaves the list. Returns `true`
    /// when the list has to be reloaded.
    pub async fn reconcile_favorite(&self, track_id: &str, favorite: bool) -> bool {
        let mut content = self.content_state.lock().await;
        let ContentView::Tracks(list) = &mut content.view else {
            return false;
        };

        if list.kind == ViewKind::Favorites && !favorite {
            list.remove_where(|t| t.id == track_id)
        } else {
            list.update_where(|t| t.id == track_id, |t| t.favorite = favorite);
            false
        }
    }
}
