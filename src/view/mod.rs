//! View module - UI rendering
//!
//! - `utils`: Shared formatting and style helpers
//! - `layout`: Top bar (search, location) and sidebar
//! - `content`: Track table, artist grid, pagination bar
//! - `progress`: Now-playing bar
//! - `overlays`: Error notification, filter editor, help popup

mod content;
mod layout;
mod overlays;
mod progress;
mod utils;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::model::{ContentState, PlaybackInfo, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackInfo, ui_state: &UiState, content_state: &ContentState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + location
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(3), // Now playing
            ])
            .split(frame.area());

        let location = content_state.view.location();
        layout::render_top_bar(frame, chunks[0], ui_state, location.as_ref());

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20), // Library
                Constraint::Percentage(80), // Main content
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], ui_state);

        let playing_id = playback.track.as_ref().map(|t| t.id.as_str());
        content::render_main_content(frame, main_chunks[1], ui_state, content_state, playing_id);

        progress::render_progress_bar(frame, chunks[2], playback, ui_state);

        if ui_state.filter_input.is_some() {
            overlays::render_filter_editor(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }
    }
}
