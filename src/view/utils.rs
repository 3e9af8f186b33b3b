//! Utility functions for rendering UI components

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::model::Pagination;

/// `m:ss`, or `h:mm:ss` for anything an hour or longer
pub fn format_duration(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(max_number: u64) -> usize {
    if max_number == 0 {
        2
    } else {
        max_number.ilog10() as usize + 2
    }
}

/// Terminal cells taken by `s`; wide (CJK) characters count as two
pub fn cell_width(s: &str) -> usize {
    Span::raw(s).width()
}

/// Cut `s` to `max_width` terminal cells, ending in `...` when shortened,
/// and pad the rest with spaces.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let width = cell_width(s);
    if width <= max_width {
        return format!("{}{}", s, " ".repeat(max_width - width));
    }

    let ellipsis = &"..."[..max_width.min(3)];
    let budget = max_width - ellipsis.len();
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let ch_width = cell_width(ch.encode_utf8(&mut [0; 4]));
        if used + ch_width > budget {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push_str(ellipsis);
    out.push_str(&" ".repeat(budget - used));
    out
}

pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn row_style(is_selected: bool, is_focused: bool, is_playing: bool) -> Style {
    if is_selected && is_focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if is_playing {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// "41-60 of 95" style range for the pagination bar
pub fn item_range(pagination: &Pagination, visible: usize) -> String {
    if pagination.total == 0 || visible == 0 {
        return format!("0 of {}", pagination.total);
    }
    let first = pagination.offset() + 1;
    let last = pagination.offset() + visible as u64;
    format!("{}-{} of {}", first, last, pagination.total)
}
