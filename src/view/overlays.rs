//! Overlay rendering (error notification, filter editor, help popup)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::{FILTER_KEYS, UiState};
use super::utils::cell_width;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize;

        // Height: borders plus the wrapped message
        let error_line_count = cell_width(error_msg).div_ceil(inner_width) as u16;
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = centered(area, popup_width, popup_height);
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_filter_editor(frame: &mut Frame, ui_state: &UiState) {
    let Some(input) = &ui_state.filter_input else {
        return;
    };
    let area = frame.area();
    let popup_area = centered(area, 70, 9);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Green)),
            Span::raw(format!("{}▏", input)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Separate filters with `;`, e.g. genre=Jazz; yearFrom=1960",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Keys: {}", FILTER_KEYS.join(", ")),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(error) = &ui_state.filter_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let editor = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Filters (Enter to apply, Esc to cancel) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(editor, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = [
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("PgUp / PgDn", "Jump ten rows"),
        ("Enter", "Open view / Play track / Open artist"),
        ("Backspace / Esc", "Go back"),
        ("/", "Focus search"),
        ("", ""),
        ("", "── Pages ──"),
        ("← / →", "Previous / next page"),
        ("Home / End", "First / last page"),
        ("+ / -", "Larger / smaller pages"),
        ("1 - 6", "Sort by title, artist, album, duration, year, plays"),
        ("F", "Edit filters"),
        ("C", "Clear filters"),
        ("R", "Reload"),
        ("", ""),
        ("", "── Actions ──"),
        ("A", "Add to playlist"),
        ("X", "Toggle favorite"),
        ("O", "Open album"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, 76, popup_height);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^44}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
