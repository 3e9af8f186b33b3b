//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, ListChange, SortKey};
use super::AppController;

/// Rows skipped by PageUp/PageDown inside the visible page
const SELECTION_JUMP: isize = 10;

fn sort_key_for(c: char) -> Option<SortKey> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    SortKey::ALL.get(index).copied()
}

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Error message blocks all other interactions
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        if model.is_filter_editor_open().await {
            match key.code {
                KeyCode::Esc => model.close_filter_editor().await,
                KeyCode::Enter => {
                    if let Some(filters) = model.submit_filter_editor().await {
                        drop(model);
                        self.apply_change(ListChange::Filters(filters)).await;
                    }
                }
                KeyCode::Backspace => model.filter_input_backspace().await,
                KeyCode::Char(c) => model.filter_input_push(c).await,
                _ => {}
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Search box captures typing
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.cycle_section_backward().await;
                    } else {
                        model.cycle_section_forward().await;
                    }
                    return Ok(());
                }
                KeyCode::BackTab => {
                    model.cycle_section_backward().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    self.submit_search().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.set_active_section(ActiveSection::MainContent).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    model.append_to_search(c).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if ui_state.active_section == ActiveSection::Library {
            match key.code {
                KeyCode::Up => {
                    model.library_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.library_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    self.open_library_item().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if ui_state.active_section == ActiveSection::MainContent {
            match key.code {
                KeyCode::Up => {
                    model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.content_move_down().await;
                    return Ok(());
                }
                KeyCode::PageUp | KeyCode::PageDown => {
                    let delta = if key.code == KeyCode::PageUp {
                        -SELECTION_JUMP
                    } else {
                        SELECTION_JUMP
                    };
                    model.content_move_by(delta).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.activate_selected().await;
                    });
                    return Ok(());
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    drop(model);
                    self.add_selected_to_playlist().await;
                    return Ok(());
                }
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.toggle_favorite_selected().await;
                    });
                    return Ok(());
                }
                KeyCode::Char('o') | KeyCode::Char('O') => {
                    drop(model);
                    self.open_selected_album().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Backspace | KeyCode::Esc => {
                drop(model);
                self.go_back().await;
            }
            // Pages
            KeyCode::Left => {
                drop(model);
                self.apply_change(ListChange::PrevPage).await;
            }
            KeyCode::Right => {
                drop(model);
                self.apply_change(ListChange::NextPage).await;
            }
            KeyCode::Home => {
                drop(model);
                self.apply_change(ListChange::FirstPage).await;
            }
            KeyCode::End => {
                drop(model);
                self.apply_change(ListChange::LastPage).await;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                drop(model);
                self.apply_change(ListChange::LargerPageSize).await;
            }
            KeyCode::Char('-') => {
                drop(model);
                self.apply_change(ListChange::SmallerPageSize).await;
            }
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(sort_key) = sort_key_for(c) {
                    drop(model);
                    self.apply_change(ListChange::Sort(sort_key)).await;
                }
            }
            // Focus search
            KeyCode::Char('/') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                model.open_filter_editor().await;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                drop(model);
                self.apply_change(ListChange::ClearFilters).await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.spawn_reload().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_sort_keys() {
        assert_eq!(sort_key_for('1'), Some(SortKey::Title));
        assert_eq!(sort_key_for('6'), Some(SortKey::PlayCount));
        assert_eq!(sort_key_for('0'), None);
        assert_eq!(sort_key_for('7'), None);
    }
}
