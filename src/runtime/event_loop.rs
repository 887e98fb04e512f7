use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use tracklist::config;
use tracklist::list::{DragPayload, ListChange, SortMode, SortOrder};
use tracklist::track::{TrackId, TrackRef};

use crate::runtime::startup::OpenView;
use crate::ui;

/// State the host keeps next to the view across iterations.
pub struct HostState {
    /// Cursor row in the track list.
    pub cursor: usize,
    /// Track under the cursor, so the cursor follows it through reorders.
    cursor_id: Option<TrackId>,
    /// Direction used when cycling into a field sort.
    pub order: SortOrder,
    /// Selection picked up with `m`, waiting to be dropped.
    pub grabbed: Option<DragPayload>,
    /// Tracks exported to the playlist pane.
    pub playlist: Vec<TrackRef>,
    /// One-line feedback for the last action.
    pub message: Option<String>,
    /// Number of list deltas observed so far.
    pub changes_seen: usize,
    changes: Receiver<ListChange>,
}

impl HostState {
    pub fn new(view: &mut OpenView, order: SortOrder) -> Self {
        let changes = view.list_mut().subscribe();
        Self {
            cursor: 0,
            cursor_id: None,
            order,
            grabbed: None,
            playlist: Vec::new(),
            message: None,
            changes_seen: 0,
            changes,
        }
    }

    /// Drain list deltas and put the cursor back on its track.
    pub fn sync(&mut self, view: &OpenView) {
        let drained = self.changes.try_iter().count();
        self.changes_seen += drained;

        let list = view.list();
        if let Some(row) = self
            .cursor_id
            .as_ref()
            .and_then(|id| list.entries().iter().position(|e| e.id() == id))
        {
            self.cursor = row;
        }
        self.place_cursor(view, self.cursor);
    }

    fn place_cursor(&mut self, view: &OpenView, row: usize) {
        let list = view.list();
        self.cursor = row.min(list.len().saturating_sub(1));
        self.cursor_id = list.get(self.cursor).map(|e| e.id().clone());
    }
}

/// Main terminal event loop: pumps the view, draws, and handles input.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    view: &mut OpenView,
    state: &mut HostState,
) -> anyhow::Result<()> {
    loop {
        view.pump();
        state.sync(view);

        terminal.draw(|f| ui::draw(f, view, state, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, view, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub fn handle_key_event(key: KeyEvent, view: &mut OpenView, state: &mut HostState) -> bool {
    let list_len = view.list().len();
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            if state.cursor + 1 < list_len {
                state.place_cursor(view, state.cursor + 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.place_cursor(view, state.cursor.saturating_sub(1));
        }
        KeyCode::Char(' ') => {
            view.list_mut().toggle_selected(state.cursor);
        }
        KeyCode::Char('a') => view.list_mut().select_all(),
        KeyCode::Char('n') => view.list_mut().select_none(),
        KeyCode::Char('i') => view.list_mut().select_inverse(),
        KeyCode::Char('s') => {
            let next = view.list().sort_mode().cycled(state.order);
            view.list_mut().set_sort_mode(next);
            state.message = Some(format!("sorted by {next}"));
        }
        KeyCode::Char('r') => {
            state.order = state.order.flipped();
            let mode = view.list().sort_mode();
            if let SortMode::Field(..) = mode {
                view.list_mut().set_sort_mode(mode.reversed());
            }
            state.message = Some(format!("sort direction: {:?}", state.order).to_lowercase());
        }
        KeyCode::Char('S') => {
            view.list_mut().shuffle();
            state.message = Some("shuffled".to_string());
        }
        KeyCode::Char('m') => {
            state.grabbed = view.list().begin_drag();
            state.message = Some(match &state.grabbed {
                Some(payload) => format!(
                    "grabbed {} tracks; enter drops above the cursor",
                    payload.tracks.len()
                ),
                None => "nothing selected to grab".to_string(),
            });
        }
        KeyCode::Enter => drop_grabbed(view, state),
        KeyCode::Esc => {
            if state.grabbed.take().is_some() {
                state.message = Some("drag cancelled".to_string());
            }
        }
        KeyCode::Char('y') => {
            let exported = view.list().export_selection();
            state.message = Some(format!("added {} tracks to the playlist", exported.len()));
            state.playlist.extend(exported);
        }
        _ => {}
    }
    false
}

fn drop_grabbed(view: &mut OpenView, state: &mut HostState) {
    let Some(payload) = state.grabbed.take() else {
        return;
    };
    match view.list_mut().accept_drop(&payload, state.cursor) {
        Ok(start) => {
            state.place_cursor(view, start);
            state.message = Some(format!("moved {} tracks", payload.tracks.len()));
        }
        Err(e) => state.message = Some(format!("drop rejected: {e}")),
    }
}
