//! Now-playing bar rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
};

use crate::model::{PlaybackInfo, UiState};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo, ui_state: &UiState) {
    let status_text = match &playback.track {
        None => " No track playing".to_string(),
        Some(track) => {
            let icon = if playback.is_playing { "▶" } else { "■" };
            format!(" {} {} | {} ({})", icon, track.title, track.artist, track.album)
        }
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_ms / 1000),
        format_duration(playback.duration_ms / 1000)
    );

    let progress_ratio = if playback.duration_ms > 0 {
        (playback.progress_ms as f64 / playback.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} ", status_text))
        .title_bottom(Line::from(format!(" Playlist: {} ", playback.playlist_len)).right_aligned());
    if let Some(notice) = &ui_state.notice {
        block = block.title_bottom(
            Line::from(format!(" {} ", notice))
                .left_aligned()
                .style(Style::default().fg(Color::Yellow)),
        );
    }

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
