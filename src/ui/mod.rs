//! Terminal Dashboard
//!
//! Interactive view layer on top of the snapshot store: a summary view with
//! the aggregate counters and state list, a map view plotting each state at
//! its coordinates, and a per-state breakdown chart. All three read the store;
//! none of them write it.

pub mod app;
pub mod render;
mod terminal;

pub use app::{DashboardApp, View};

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::config::Config;
use crate::feed::FetchPipeline;

/// Run the dashboard until the user quits.
pub async fn run(config: &Config, pipeline: Arc<FetchPipeline>) -> anyhow::Result<()> {
    terminal::install_panic_hook();
    let mut terminal = terminal::setup()?;

    let result = run_loop(&mut terminal, config, pipeline).await;

    terminal::restore(terminal)?;
    result
}

async fn run_loop(
    terminal: &mut terminal::Tui,
    config: &Config,
    pipeline: Arc<FetchPipeline>,
) -> anyhow::Result<()> {
    let mut app = DashboardApp::new(pipeline);
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

    loop {
        let snapshot = app.snapshot();
        terminal.draw(|frame| render::render(frame, &app, &snapshot))?;

        // Block up to one tick for input; fetches settle on other runtime
        // workers and show up in the next snapshot read
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.on_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
