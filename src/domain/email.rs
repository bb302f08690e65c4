use serde::{Deserialize, Serialize};

/// Position of an email in the loaded list.
pub type EmailId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub from: String,
    pub header: String,
    pub content: String,
    pub email_address: String,
    pub img: String,
    #[serde(default)]
    pub read: bool,
}

impl Email {
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [&self.content, &self.from, &self.header, &self.email_address]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Single-letter badge used where the avatar image can't be shown.
    pub fn initial(&self) -> char {
        self.from
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}
