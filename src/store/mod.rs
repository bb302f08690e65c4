pub mod state;

pub use state::{AppState, FetchStatus, View};
