mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;

use config::Settings;
use controller::AppController;
use model::{AppModel, Catalog, LibraryClient, Player, SessionPlayer};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    settings.validate().map_err(anyhow::Error::msg)?;

    if let Err(e) = logging::init_logging(Path::new(&settings.logging.directory)) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== musiclib-rs starting ===");
    tracing::info!(base_url = %settings.api.base_url, "Using music library server");

    let start_location = settings.start_location().map_err(anyhow::Error::msg)?;

    let catalog: Arc<dyn Catalog> = Arc::new(LibraryClient::new(&settings.api.base_url));
    let player: Arc<dyn Player> = Arc::new(SessionPlayer::new(catalog.clone()));
    let model = Arc::new(Mutex::new(AppModel::new(
        settings.page_size(),
        settings.error_display(),
    )));
    let controller = AppController::new(model.clone(), catalog, player);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    controller.navigate_root(start_location).await;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("musiclib-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let playback = controller.playback_info().await;
        let (ui_state, content_state, should_quit) = {
            let model_guard = model.lock().await;
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &content_state);
        })?;

        // Short poll keeps the progress bar moving
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
