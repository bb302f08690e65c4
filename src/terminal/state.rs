use ratatui::widgets::ListState;

use crate::domain::email::EmailId;
use crate::mail::FetchEvent;
use crate::store::{AppState, View};

/// Terminal-side state wrapped around the store: list cursor, filter input
/// field and detail scroll offset.
pub struct TuiState {
    pub app: AppState,
    pub list_state: ListState,

    /// Text in the filter field. Only reaches the store on Enter.
    pub input: String,
    pub editing: bool,

    pub body_scroll: u16,
}

impl TuiState {
    pub fn new(app: AppState) -> Self {
        let mut s = Self {
            app,
            list_state: ListState::default(),
            input: String::new(),
            editing: false,
            body_scroll: 0,
        };
        s.reset_cursor();
        s
    }

    fn visible_len(&self) -> usize {
        self.app.filtered_emails().len()
    }

    fn reset_cursor(&mut self) {
        if self.visible_len() == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn current_selected_id(&self) -> Option<EmailId> {
        let idx = self.list_state.selected()?;
        self.app.filtered_emails().get(idx).map(|(id, _)| *id)
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.visible_len() as i32;
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub fn select_first(&mut self) {
        self.reset_cursor();
    }

    pub fn select_last(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.current_selected_id() {
            self.body_scroll = 0;
            self.app.select_email(id);
        }
    }

    /// Back button and logo both land here.
    pub fn close_email(&mut self) {
        self.body_scroll = 0;
        self.app.deselect_email();
    }

    pub fn show_compose(&mut self) {
        self.app.show_compose();
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
    }

    pub fn apply_filter(&mut self) {
        self.editing = false;
        self.body_scroll = 0;
        self.app.set_filter(self.input.clone());
        self.reset_cursor();
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if self.app.view() != View::EmailDetail {
            return;
        }
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub((-delta) as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    pub fn apply_fetch(&mut self, event: FetchEvent) {
        self.app.apply_fetch(event);
        self.reset_cursor();
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new(AppState::new())
    }
}
