use log::{debug, info, warn};
use serde::Serialize;

use crate::domain::email::{Email, EmailId};
use crate::mail::FetchEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum View {
    #[default]
    EmailList,
    EmailDetail,
    ComposeStub,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum FetchStatus {
    #[default]
    Pending,
    Loaded(usize),
    Failed(String),
}

/// Everything the views are rendered from.
///
/// Fields are private so that the pairing of `view == EmailDetail` with a
/// present `selected` index can only change through the methods below.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppState {
    emails: Vec<Email>,
    selected: Option<EmailId>,
    filter: String,
    view: View,
    fetch: FetchStatus,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch
    }

    pub fn selected_id(&self) -> Option<EmailId> {
        self.selected
    }

    pub fn selected_email(&self) -> Option<&Email> {
        self.selected.and_then(|id| self.emails.get(id))
    }

    pub fn select_email(&mut self, id: EmailId) {
        let Some(email) = self.emails.get_mut(id) else {
            warn!("ignoring selection of unknown email #{id}");
            return;
        };
        email.read = true;
        self.selected = Some(id);
        self.view = View::EmailDetail;
    }

    pub fn deselect_email(&mut self) {
        self.selected = None;
        self.view = View::EmailList;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.selected = None;
        self.view = View::EmailList;
        debug!("filter set to {:?}", self.filter);
    }

    pub fn show_compose(&mut self) {
        self.selected = None;
        self.view = View::ComposeStub;
    }

    pub fn load_emails(&mut self, emails: Vec<Email>) {
        self.emails = emails;
        self.selected = None;
        if self.view == View::EmailDetail {
            self.view = View::EmailList;
        }
    }

    /// Emails matching the filter, in list order, paired with their id.
    pub fn filtered_emails(&self) -> Vec<(EmailId, &Email)> {
        let needle = self.filter.to_lowercase();
        self.emails
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(&needle))
            .collect()
    }

    pub fn apply_fetch(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Loaded(emails) => {
                info!("loaded {} emails", emails.len());
                self.fetch = FetchStatus::Loaded(emails.len());
                self.load_emails(emails);
            }
            FetchEvent::Failed(err) => {
                warn!("email fetch failed: {err}");
                self.fetch = FetchStatus::Failed(err.to_string());
            }
        }
    }
}
