//! UI rendering helpers for the terminal host.
//!
//! This module renders the open detail view using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use tracklist::config::UiSettings;
use tracklist::list::{BrowseState, SortableTrackList};
use tracklist::track::display_from_fields;

use crate::runtime::{HostState, OpenView};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("space", "select"),
    ("a/n/i", "all/none/invert"),
    ("s", "sort mode"),
    ("r", "direction"),
    ("S", "shuffle"),
    ("m", "grab"),
    ("enter", "drop above"),
    ("esc", "cancel drag"),
    ("y", "to playlist"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn loading_text(list: &SortableTrackList) -> String {
    match list.browse_state() {
        BrowseState::NotStarted => "not started".to_string(),
        BrowseState::Loading => format!("loading… ({} so far)", list.len()),
        BrowseState::PartiallyLoaded => format!("{} tracks, more coming", list.len()),
        BrowseState::Loaded => format!("{} tracks", list.len()),
        BrowseState::Failed => format!("failed after {} tracks", list.len()),
    }
}

/// Visible window `[start, end)` of `total` rows that keeps `selected`
/// near the middle of `height` rows.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the whole host UI into `frame`.
pub fn draw(frame: &mut Frame, view: &OpenView, host: &HostState, ui_settings: &UiSettings) {
    let list = view.list();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.title()))
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = vec![
            format!("BROWSE: {}", loading_text(list)),
            format!("SORT: {}", list.sort_mode()),
            format!("SELECTED: {}", list.selected_indices().len()),
            format!("CHANGES: {}", host.changes_seen),
        ];
        if let Some(payload) = &host.grabbed {
            parts.push(format!("DRAGGING: {}", payload.tracks.len()));
        }
        if let Some(failure) = list.failure() {
            parts.push(format!("ERROR: {}", failure.error));
        }
        if let Some(msg) = &host.message {
            parts.push(msg.clone());
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Details
    let details = view.detail_lines().join("\n");
    let details_par = Paragraph::new(details)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" details "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(details_par, chunks[2]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[3]);

    // Track list
    {
        let total = list.len();
        let list_height = panes[0].height.saturating_sub(2) as usize;
        let (start, end) = visible_window(total, list_height, host.cursor);
        let grabbed_rows: &[usize] = host
            .grabbed
            .as_ref()
            .and_then(|p| p.origin.as_ref())
            .map(|o| o.indices.as_slice())
            .unwrap_or(&[]);

        let visible_items: Vec<ListItem> = list.entries()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let row = start + offset;
                let mark = if entry.is_selected() { "[x]" } else { "[ ]" };
                let grip = if grabbed_rows.contains(&row) { "≡" } else { " " };
                let text = display_from_fields(
                    entry.track(),
                    &ui_settings.display_fields,
                    &ui_settings.display_separator,
                );
                ListItem::new(format!("{mark}{grip}{text}"))
            })
            .collect();

        let widget = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(host.cursor.saturating_sub(start)));
        }
        frame.render_stateful_widget(widget, panes[0], &mut state);
    }

    // Playlist pane (external drop target)
    let playlist_items: Vec<ListItem> = host
        .playlist
        .iter()
        .map(|t| ListItem::new(t.title.as_str()))
        .collect();
    let playlist = List::new(playlist_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" playlist ({}) ", host.playlist.len())),
    );
    frame.render_widget(playlist, panes[1]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
