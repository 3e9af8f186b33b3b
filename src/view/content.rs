//! Main content area rendering (track tables, artist grid, pagination)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState as WidgetListState, Padding, Paragraph, Wrap},
};

use crate::model::{
    ActiveSection, Artist, ContentState, ContentView, ListState, Track, UiState, ViewKind,
};
use super::utils::{
    border_style, calculate_num_width, format_duration, item_range, row_style, truncate_string,
};

const ARTIST_CARD_WIDTH: u16 = 26;
const ARTIST_CARD_HEIGHT: u16 = 4;

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    playing_id: Option<&str>,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;

    match &content_state.view {
        ContentView::Empty => {
            let content = Paragraph::new(
                "Pick a view in the Library and press Enter\n\nUse Tab to navigate between sections\nPress H for all key bindings",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style(is_focused)),
            );
            frame.render_widget(content, area);
        }
        ContentView::Tracks(list) => {
            let body = render_list_frame(frame, area, list, is_focused);
            render_track_table(frame, body, list, is_focused, playing_id);
        }
        ContentView::Artists(list) => {
            let body = render_list_frame(frame, area, list, is_focused);
            render_artist_grid(frame, body, list, is_focused);
        }
    }
}

/// Draw the border, error banner and pagination bar shared by every list
/// view. Returns the area left for the items.
fn render_list_frame<T>(frame: &mut Frame, area: Rect, list: &ListState<T>, is_focused: bool) -> Rect {
    let mut title = format!(" {} ({}) ", list.kind.title(), list.pagination.total);
    if list.kind.supports_sort() {
        title.push_str(&format!(
            "· {} {} ",
            list.sort_key.label(),
            list.sort_order.arrow()
        ));
    }
    if !list.search.is_empty() {
        title.push_str(&format!("· \"{}\" ", list.search));
    }
    if list.kind.supports_filters() && !list.filters.is_empty() {
        title.push_str(&format!("· {} ", list.filters));
    }
    if list.loading {
        title.push_str("· Loading... ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner_height = if list.error.is_some() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    if let Some(error) = &list.error {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(format!("⚠ {} ", error), Style::default().fg(Color::Red)),
            Span::styled(
                "(R to retry)",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]))
        .wrap(Wrap { trim: true });
        frame.render_widget(banner, chunks[0]);
    }

    render_pagination_bar(frame, chunks[2], list);
    chunks[1]
}

fn render_pagination_bar<T>(frame: &mut Frame, area: Rect, list: &ListState<T>) {
    let pagination = &list.pagination;
    let line = Line::from(vec![
        Span::styled(
            format!("Page {}/{}", pagination.page, pagination.last_page()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {}  {} per page",
            item_range(pagination, list.items.len()),
            pagination.page_size.get()
        )),
        Span::styled(
            "   ←/→ page  +/- size",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_track_table(
    frame: &mut Frame,
    area: Rect,
    list: &ListState<Track>,
    is_focused: bool,
    playing_id: Option<&str>,
) {
    if list.items.is_empty() {
        let text = if list.loading { "Loading..." } else { "No tracks" };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let show_history = list.kind == ViewKind::RecentlyPlayed;
    let num_width = calculate_num_width(list.item_number(list.items.len().saturating_sub(1)));
    let fav_width = 2;
    let duration_width = 8;
    let fixed_width = 1 + num_width + 2 + fav_width + 2 + 2 + 2 + 2 + duration_width;
    let remaining = (area.width as usize).saturating_sub(fixed_width);
    let title_width = remaining * 40 / 100;
    let artist_width = remaining * 30 / 100;
    let third_width = remaining.saturating_sub(title_width + artist_width);

    let third_header = if show_history { "Last played" } else { "Album" };
    let mut items: Vec<ListItem> = vec![
        ListItem::new(format!(
            " {:<num_width$}  {:<fav_width$}  {}  {}  {}  {}",
            "#",
            "",
            truncate_string("Title", title_width),
            truncate_string("Artist", artist_width),
            truncate_string(third_header, third_width),
            "Duration",
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ];

    items.extend(list.items.iter().enumerate().map(|(i, track)| {
        let is_playing = playing_id.is_some_and(|id| id == track.id);
        let playing_indicator = if is_playing { "▶" } else { " " };
        let favorite = if track.favorite { "♥" } else { " " };
        let third = if show_history {
            track
                .last_played
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default()
        } else {
            track.album.clone()
        };

        ListItem::new(format!(
            "{}{:<num_width$}  {:<fav_width$}  {}  {}  {}  {}",
            playing_indicator,
            list.item_number(i),
            favorite,
            truncate_string(&track.title, title_width),
            truncate_string(&track.artist, artist_width),
            truncate_string(&third, third_width),
            format_duration(track.duration_secs),
        ))
        .style(row_style(i == list.selected_index, is_focused, is_playing))
    }));

    let widget = List::new(items).highlight_style(Style::default());
    let mut state = WidgetListState::default();
    state.select(Some(list.selected_index + 1)); // +1 for header
    frame.render_stateful_widget(widget, area, &mut state);
}

fn render_artist_grid(frame: &mut Frame, area: Rect, list: &ListState<Artist>, is_focused: bool) {
    if list.items.is_empty() {
        let text = if list.loading { "Loading..." } else { "No artists" };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let columns = (area.width / ARTIST_CARD_WIDTH).max(1) as usize;
    let visible_rows = (area.height / ARTIST_CARD_HEIGHT).max(1) as usize;
    let selected_row = list.selected_index / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(ARTIST_CARD_HEIGHT); visible_rows])
        .split(area);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let start = (first_row + row_offset) * columns;
        if start >= list.items.len() {
            break;
        }
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(ARTIST_CARD_WIDTH); columns])
            .split(*row_area);

        for (column, cell) in cells.iter().enumerate() {
            let index = start + column;
            let Some(artist) = list.items.get(index) else {
                break;
            };
            render_artist_card(frame, *cell, artist, index == list.selected_index, is_focused);
        }
    }
}

fn render_artist_card(frame: &mut Frame, area: Rect, artist: &Artist, is_selected: bool, is_focused: bool) {
    let name_width = area.width.saturating_sub(2) as usize;
    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            truncate_string(&artist.name, name_width),
            row_style(is_selected, is_focused, false),
        )),
        Line::from(Span::styled(
            format!("{} tracks · {} albums", artist.track_count, artist.album_count),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(is_selected && is_focused)),
    );
    frame.render_widget(card, area);
}
