pub mod decoders;
pub mod http_client;

use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::debug;
use thiserror::Error;

use crate::domain::email::Email;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("fetch worker stopped without a result")]
    WorkerGone,
}

/// Completion of the startup fetch.
#[derive(Debug)]
pub enum FetchEvent {
    Loaded(Vec<Email>),
    Failed(FetchError),
}

impl From<Result<Vec<Email>, FetchError>> for FetchEvent {
    fn from(res: Result<Vec<Email>, FetchError>) -> Self {
        match res {
            Ok(emails) => FetchEvent::Loaded(emails),
            Err(e) => FetchEvent::Failed(e),
        }
    }
}

/// Anything that can produce the email list. Closures work too, which is
/// what the tests use to inject outcomes.
pub trait EmailSource: Send {
    fn fetch_emails(&self) -> Result<Vec<Email>, FetchError>;
}

impl<F> EmailSource for F
where
    F: Fn() -> Result<Vec<Email>, FetchError> + Send,
{
    fn fetch_emails(&self) -> Result<Vec<Email>, FetchError> {
        self()
    }
}

/// Run the fetch on a worker thread. Exactly one event arrives on the
/// returned channel; the sender is dropped right after.
pub fn spawn_fetch<S>(source: S) -> Receiver<FetchEvent>
where
    S: EmailSource + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let event = FetchEvent::from(source.fetch_emails());
        if tx.send(event).is_err() {
            debug!("fetch finished after the UI went away");
        }
    });
    rx
}
