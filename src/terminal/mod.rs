pub mod events;
pub mod state;
pub mod ui;
pub mod view;

use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use color_eyre::eyre::{Report, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use log::{debug, info};

use crate::mail::{EmailSource, FetchError, FetchEvent, spawn_fetch};
use crate::store::AppState;
use crate::terminal::events::{handle_click, handle_key};
use crate::terminal::state::TuiState;
use crate::terminal::ui::{RenderTarget, hit_test};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Start the fetch, take over the terminal and run until the user quits.
pub fn run_tui<S>(source: S) -> Result<()>
where
    S: EmailSource + 'static,
{
    color_eyre::install()?;

    let fetch = spawn_fetch(source);
    let mut state = TuiState::new(AppState::new());

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(Report::from)
        .and_then(|()| run(&mut terminal, &mut state, fetch));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run<T: RenderTarget>(
    target: &mut T,
    state: &mut TuiState,
    fetch: Receiver<FetchEvent>,
) -> Result<()> {
    let mut fetch = Some(fetch);
    render(target, state)?;

    loop {
        if poll_fetch(&mut fetch, state) {
            render(target, state)?;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(key, state) {
                    info!("quit");
                    return Ok(());
                }
                render(target, state)?;
            }
            Event::Mouse(mouse) => {
                if handle_mouse(target, mouse, state)? {
                    render(target, state)?;
                }
            }
            Event::Resize(_, _) => render(target, state)?,
            _ => {}
        }
    }
}

/// Left clicks only. Returns `true` when something was hit.
fn handle_mouse<T: RenderTarget>(
    target: &T,
    mouse: MouseEvent,
    state: &mut TuiState,
) -> Result<bool> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(false);
    }
    let Some(screen) = view::build(state) else {
        return Ok(false);
    };
    let Some(hit) = hit_test(target.area()?, &screen, mouse.column, mouse.row) else {
        return Ok(false);
    };
    debug!("click on {hit:?}");
    handle_click(hit, state);
    Ok(true)
}

/// Take the fetch result if it has arrived. Returns `true` when the state
/// changed. `fetch` becomes `None` once the outcome is known.
fn poll_fetch(fetch: &mut Option<Receiver<FetchEvent>>, state: &mut TuiState) -> bool {
    let Some(rx) = fetch else {
        return false;
    };
    let event = match rx.try_recv() {
        Ok(ev) => ev,
        Err(TryRecvError::Empty) => return false,
        Err(TryRecvError::Disconnected) => FetchEvent::Failed(FetchError::WorkerGone),
    };
    *fetch = None;
    state.apply_fetch(event);
    true
}

/// Full redraw of the current view.
fn render<T: RenderTarget>(target: &mut T, state: &TuiState) -> Result<()> {
    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "current state: {}",
            serde_json::to_string_pretty(&state.app).unwrap_or_default()
        );
    }
    let Some(screen) = view::build(state) else {
        return Ok(());
    };
    target.render(&screen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;
    use crate::domain::email::Email;
    use crate::store::FetchStatus;
    use crate::terminal::view::{Main, Screen};

    #[derive(Default)]
    struct Recorder(Vec<Screen>);

    impl RenderTarget for Recorder {
        fn render(&mut self, screen: &Screen) -> io::Result<()> {
            self.0.push(screen.clone());
            Ok(())
        }

        fn area(&self) -> io::Result<Rect> {
            Ok(Rect::new(0, 0, 80, 20))
        }
    }

    #[test]
    fn every_render_is_a_full_screen() {
        let mut target = Recorder::default();
        let mut state = TuiState::default();

        render(&mut target, &state).unwrap();
        state.apply_fetch(FetchEvent::Loaded(vec![Email {
            from: "Ana".into(),
            header: "Hi".into(),
            content: "lunch?".into(),
            email_address: "ana@x.com".into(),
            img: String::new(),
            read: false,
        }]));
        render(&mut target, &state).unwrap();
        state.open_selected();
        render(&mut target, &state).unwrap();

        assert_eq!(target.0.len(), 3);
        assert!(matches!(&target.0[0].main, Main::List(l) if l.rows.is_empty()));
        assert!(matches!(&target.0[1].main, Main::List(l) if l.rows.len() == 1));
        assert!(matches!(&target.0[2].main, Main::Detail(d) if d.content == "lunch?"));
    }

    #[test]
    fn pending_fetch_leaves_state_alone() {
        let (_tx, rx) = std::sync::mpsc::channel();
        let mut fetch = Some(rx);
        let mut state = TuiState::default();
        assert!(!poll_fetch(&mut fetch, &mut state));
        assert!(fetch.is_some());
        assert_eq!(state.app.fetch_status(), &FetchStatus::Pending);
    }

    #[test]
    fn dead_worker_is_reported_as_a_failure() {
        let mut fetch = Some(spawn_fetch(|| -> Result<Vec<Email>, FetchError> {
            panic!("worker died")
        }));
        let mut state = TuiState::default();

        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        while !poll_fetch(&mut fetch, &mut state) {
            assert!(std::time::Instant::now() < deadline, "fetch never settled");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(fetch.is_none());
        assert!(matches!(
            state.app.fetch_status(),
            FetchStatus::Failed(r) if r.contains("without a result")
        ));
        let Some(Screen { main: Main::List(list), .. }) = view::build(&state) else {
            panic!("expected the list view");
        };
        assert!(list.notice.unwrap().starts_with("Could not load emails"));
        // already settled, nothing more to do
        assert!(!poll_fetch(&mut fetch, &mut state));
    }

    #[test]
    fn left_click_on_a_row_opens_it() {
        use crossterm::event::KeyModifiers;

        let target = Recorder::default();
        let mut state = TuiState::default();
        state.apply_fetch(FetchEvent::Loaded(vec![
            Email {
                from: "Ana".into(),
                header: "Hi".into(),
                content: "lunch?".into(),
                email_address: "ana@x.com".into(),
                img: String::new(),
                read: false,
            },
            Email {
                from: "Bo".into(),
                header: "Re: Hi".into(),
                content: "sure".into(),
                email_address: "bo@x.com".into(),
                img: String::new(),
                read: false,
            },
        ]));

        let click = |kind, row| MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // header is 3 rows, then the list border; row 5 is the second email
        let right = click(MouseEventKind::Down(MouseButton::Right), 5);
        assert!(!handle_mouse(&target, right, &mut state).unwrap());
        let left = click(MouseEventKind::Down(MouseButton::Left), 5);
        assert!(handle_mouse(&target, left, &mut state).unwrap());
        assert_eq!(state.app.selected_id(), Some(1));
        assert!(state.app.emails()[1].read);
        assert!(!state.app.emails()[0].read);
    }
}
