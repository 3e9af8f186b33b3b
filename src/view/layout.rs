//! Layout rendering (top bar, sidebar)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::model::{ActiveSection, Location, UiState};
use super::utils::border_style;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, location: Option<&Location>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Search input
            Constraint::Percentage(60), // Current location
        ])
        .split(area);

    let searching = ui_state.active_section == ActiveSection::Search;
    let search_style = if searching {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() && !searching {
        "Press / to search".to_string()
    } else if searching {
        format!("{}▏", ui_state.search_query)
    } else {
        ui_state.search_query.clone()
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(searching)),
    );
    frame.render_widget(search, chunks[0]);

    let location_text = location.map(|l| l.to_string()).unwrap_or_default();
    let location = Paragraph::new(location_text)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Location ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(location, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let focused = ui_state.active_section == ActiveSection::Library;

    let library_items: Vec<ListItem> = ui_state
        .library_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == ui_state.library_selected && focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == ui_state.library_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(item.name.clone()).style(style)
        })
        .collect();

    let library = List::new(library_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Library ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(focused)),
    );
    frame.render_widget(library, area);
}
