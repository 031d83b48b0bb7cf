//! podtui - terminal podcast browser
//!
//! Search, filter and page through a podcast catalog, then drill into a
//! show's seasons and episodes.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! podtui
//!
//! # Open the TUI on a specific view
//! podtui --route "/?search=history&genre=3&page=2"
//!
//! # CLI mode (for automation)
//! podtui list --search crime --json
//! podtui show 10716 --season 1
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use podtui::api::CatalogClient;
use podtui::app::{App, AppMessage};
use podtui::cli::{Cli, Command, ExitCode, Output};
use podtui::commands;
use podtui::config::Config;
use podtui::fetch;
use podtui::logging;
use podtui::route::Route;
use podtui::ui;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url());
    let client = CatalogClient::with_base_url(api_url);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_cli();
        let exit_code = run_cli(cli, &client, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        let log_path = logging::init_tui()?;
        tracing::info!(api = client.base_url(), log = ?log_path, "starting TUI");
        run_tui(&cli, client, &config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, client: &CatalogClient, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, client, config.page_size(), &output).await,

        Some(Command::Show(cmd)) => commands::show_cmd(cmd, client, &output).await,

        Some(Command::Genres) => commands::genres_cmd(&output),

        Some(Command::Genre(cmd)) => commands::genre_cmd(cmd, client, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: &Cli, client: CatalogClient, config: &Config) -> Result<()> {
    let (app, commands) = App::with_channels();
    let mut app = app.with_page_size(config.page_size());
    app.set_theme(config.theme());

    let (worker, mut messages) = fetch::spawn_worker(client, commands);

    let start = match cli.route.as_deref().map(Route::parse).transpose() {
        Ok(route) => route.unwrap_or_default(),
        Err(e) => {
            app.set_error(format!("Invalid route: {}", e));
            Route::default()
        }
    };
    app.start(start);

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &mut messages).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    // Remember a toggled theme for the next session
    if let Some(updated) = config.with_theme(app.theme()) {
        let saved = match &cli.config {
            Some(path) => updated.save_to(path),
            None => updated.save(),
        };
        if let Err(e) = saved {
            tracing::warn!(error = %e, "could not save theme");
        }
    }

    // Dropping the app closes the command channel and stops the worker
    drop(app);
    if let Err(e) = worker.await {
        tracing::warn!(error = %e, "fetch worker ended abnormally");
    }

    result
}

/// Main event loop - handles input, applies fetch results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    messages: &mut mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        // Apply every fetch result that arrived since the last frame
        while let Ok(message) = messages.try_recv() {
            app.handle_message(message);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
