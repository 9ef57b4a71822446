//! TUI module
//!
//! Terminal viewer for relationship graphs. Built with ratatui: the focused
//! resource's graph is drawn with status-colored nodes and edges, and
//! opening a node fetches and shows that resource's graph in turn.

mod app;
mod theme;
pub mod views;

pub use app::{App, FetchResult, Move};
pub use theme::Theme;

use crate::api::{self, ApiClient};
use crate::config::Config;
use crate::graph::{LayoutConfig, Route};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Run the TUI application starting at `start`
pub async fn run_tui(
    client: Arc<dyn ApiClient>,
    start: Route,
    config: Config,
    theme: Theme,
) -> Result<()> {
    tracing::debug!("Initializing TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Box sizes in the config are for exported graphs; the terminal uses cells
    let layout = LayoutConfig::terminal().with_direction(config.graph.direction);
    let mut app = App::new(start, layout, theme);
    let result = event_loop(&mut terminal, &mut app, client).await;

    tracing::debug!("TUI shutting down");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: Arc<dyn ApiClient>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();

    loop {
        // Dispatch a pending fetch
        if let Some(route) = app.take_fetch_request() {
            let client = Arc::clone(&client);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api::fetch_focal(client.as_ref(), &route)
                    .await
                    .map_err(|e| e.to_string());
                if let Err(ref e) = result {
                    tracing::warn!("Failed to fetch {}: {}", route, e);
                }
                let _ = tx.send((route, result));
            });
        }

        // Apply finished fetches, stale ones are dropped by the app
        while let Ok((route, result)) = rx.try_recv() {
            app.apply_fetch_result(route, result);
        }

        terminal.draw(|f| app.render(f))?;

        // Handle input events (non-blocking)
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Some(true) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}
