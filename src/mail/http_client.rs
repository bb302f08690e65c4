use std::time::Duration;

use log::info;
use reqwest::blocking::Client;
use url::Url;

use crate::domain::email::Email;
use crate::mail::decoders::decode_emails;
use crate::mail::{EmailSource, FetchError};

pub struct HttpClient {
    endpoint: Url,
    client: Client,
}

impl HttpClient {
    /// `timeout = None` waits for the server forever.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn fetch_emails(&self) -> Result<Vec<Email>, FetchError> {
        info!("GET {}", self.endpoint);
        let resp = self.client.get(self.endpoint.clone()).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.bytes()?;
        let emails = decode_emails(&body)?;
        info!("server returned {} emails", emails.len());
        Ok(emails)
    }
}

impl EmailSource for HttpClient {
    fn fetch_emails(&self) -> Result<Vec<Email>, FetchError> {
        HttpClient::fetch_emails(self)
    }
}
