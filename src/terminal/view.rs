//! UI tree built from the state. Painting lives in `ui`; this module has no
//! terminal dependency so every screen can be checked as plain data.

use crate::store::{FetchStatus, View};
use crate::terminal::state::TuiState;

pub const BRAND: &str = "Webmail";
pub const INBOX_TITLE: &str = "Inbox";
pub const COMPOSE_HEADING: &str = "New email section";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub header: Header,
    pub main: Main,
}

/// Logo plus the filter field. Present on every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub brand: &'static str,
    pub filter_input: String,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Main {
    List(ListView),
    Detail(DetailView),
    Compose(ComposeView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub title: &'static str,
    pub rows: Vec<Row>,
    pub highlighted: Option<usize>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub read: bool,
    pub avatar: char,
    pub from: String,
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub from: String,
    pub email_address: String,
    pub avatar: String,
    pub header: String,
    pub content: String,
    pub scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeView {
    pub heading: &'static str,
}

/// `None` means there is nothing to draw: a detail view without a selected
/// email leaves whatever is on screen alone.
pub fn build(state: &TuiState) -> Option<Screen> {
    let main = match state.app.view() {
        View::EmailList => Main::List(email_list(state)),
        View::EmailDetail => Main::Detail(email_detail(state)?),
        View::ComposeStub => Main::Compose(ComposeView {
            heading: COMPOSE_HEADING,
        }),
    };
    Some(Screen {
        header: Header {
            brand: BRAND,
            filter_input: state.input.clone(),
            editing: state.editing,
        },
        main,
    })
}

fn email_list(state: &TuiState) -> ListView {
    let rows: Vec<Row> = state
        .app
        .filtered_emails()
        .into_iter()
        .map(|(_, e)| Row {
            read: e.read,
            avatar: e.initial(),
            from: e.from.clone(),
            header: e.header.clone(),
        })
        .collect();

    let notice = match state.app.fetch_status() {
        FetchStatus::Pending => Some("Loading emails…".to_string()),
        FetchStatus::Failed(reason) => Some(format!("Could not load emails: {reason}")),
        FetchStatus::Loaded(0) => Some("No emails.".to_string()),
        FetchStatus::Loaded(_) if rows.is_empty() => {
            Some(format!("Nothing matches \"{}\".", state.app.filter()))
        }
        FetchStatus::Loaded(_) => None,
    };

    ListView {
        title: INBOX_TITLE,
        highlighted: state.list_state.selected().filter(|i| *i < rows.len()),
        rows,
        notice,
    }
}

fn email_detail(state: &TuiState) -> Option<DetailView> {
    let e = state.app.selected_email()?;
    Some(DetailView {
        from: e.from.clone(),
        email_address: e.email_address.clone(),
        avatar: e.img.clone(),
        header: e.header.clone(),
        content: e.content.clone(),
        scroll: state.body_scroll,
    })
}
