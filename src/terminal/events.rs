use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::View;
use crate::terminal::state::TuiState;
use crate::terminal::ui::Hit;

/// Apply one key press. Returns `true` when the app should quit.
pub fn handle_key(key: KeyEvent, state: &mut TuiState) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if state.editing {
        handle_input_keys(key, state);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => {
            state.start_editing();
            return false;
        }
        // logo
        KeyCode::Char('h') => {
            state.close_email();
            return false;
        }
        _ => {}
    }

    match state.app.view() {
        View::EmailList => handle_list_keys(key, state),
        View::EmailDetail => {
            handle_detail_keys(key, state);
            false
        }
        View::ComposeStub => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b')) {
                state.close_email();
            }
            false
        }
    }
}

fn handle_input_keys(key: KeyEvent, state: &mut TuiState) {
    match key.code {
        KeyCode::Enter => state.apply_filter(),
        KeyCode::Esc => state.cancel_editing(),
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.input.push(c)
        }
        _ => {}
    }
}

/// Left click on a part of the screen, already resolved by `ui::hit_test`.
pub fn handle_click(hit: Hit, state: &mut TuiState) {
    match hit {
        Hit::Logo | Hit::Back => state.close_email(),
        Hit::Compose => state.show_compose(),
        Hit::Row(idx) => {
            state.list_state.select(Some(idx));
            state.open_selected();
        }
    }
}

fn handle_list_keys(key: KeyEvent, state: &mut TuiState) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('+') | KeyCode::Char('n') => state.show_compose(),
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        KeyCode::Home => state.select_first(),
        KeyCode::End => state.select_last(),
        _ => {}
    }
    false
}

fn handle_detail_keys(key: KeyEvent, state: &mut TuiState) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => state.close_email(),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_body(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_body(-1),
        KeyCode::PageDown => state.scroll_body(10),
        KeyCode::PageUp => state.scroll_body(-10),
        KeyCode::Home => state.body_scroll = 0,
        _ => {}
    }
}
