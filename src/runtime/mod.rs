use std::env;
use std::sync::Arc;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

mod event_loop;
mod settings;
mod startup;

pub use event_loop::HostState;
pub use startup::OpenView;

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();
    let invocation = startup::Invocation::parse(env::args().skip(1))?;

    let catalog = startup::build_catalog(&invocation.source, &settings)?;
    let mut view = OpenView::open(Arc::new(catalog), &invocation.target, &settings)?;
    let mut state = HostState::new(&mut view, startup::initial_sort_order(&settings.list));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut view, &mut state);

    view.dismiss();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !state.playlist.is_empty() {
        println!("playlist:");
        for track in &state.playlist {
            println!("  {}", track.title);
        }
    }

    run_result
}

#[cfg(test)]
mod tests;
