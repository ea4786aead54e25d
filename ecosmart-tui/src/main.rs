//! Terminal UI for EcoSmart that lets users find recycling centers near a place.

mod app;
mod input;
mod ui;

use std::{fs::OpenOptions, io, sync::Mutex, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ecosmart_core::{config::LocatorConfig, service::RecyclingLocator};
use ecosmart_provider_osm as osm;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ecosmart_core::config::load_config()?;
    init_tracing(&config)?;

    // HTTP + locator setup
    let client = osm::client(&config)?;
    let locator = RecyclingLocator::new(
        osm::plugin(client, &config),
        config.default_radius_meters,
    );
    info!(provider = %locator.provider().name, "locator ready");

    // App state
    let app = App::new();

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, &locator, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

// Logs go to a file so they never draw over the UI.
fn init_tracing(config: &LocatorConfig) -> Result<()> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    locator: &RecyclingLocator,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Search => {
                    let place = app.location_input.trim().to_owned();
                    if place.is_empty() {
                        app.error_message =
                            Some("Type a city, address or postcode, then press Enter".into());
                        continue;
                    }

                    let material = app.material();

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = locator.locate(&place, material.label()).await;

                    app.is_loading = false;
                    match res {
                        Ok(outcome) => app.apply_outcome(outcome),
                        Err(err) => {
                            warn!(%place, %material, error = %err, "search failed");
                            app.apply_error(&err);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
