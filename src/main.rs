mod controller;
mod logging;
mod model;
mod player;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::sync::Mutex;

use controller::AppController;
use model::{AppModel, HttpGateway, ImageUrlBuilder};
use player::PlayerBackend;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== portfolio-rs starting ===");

    let gateway = HttpGateway::from_env()?;
    tracing::info!(base_url = %gateway.base_url(), "Content gateway configured");

    let mut app_model = AppModel::new(ImageUrlBuilder::from_env());
    app_model.set_gateway(Arc::new(gateway));

    let player_backend = Arc::new(Mutex::new(Some(PlayerBackend::from_env())));
    let controller = AppController::new(app_model.clone(), player_backend);

    // Kick off the initial content load in the background; the UI comes up
    // with its loading states immediately.
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.refresh().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app_model, controller.clone()).await;

    // Restore terminal and release the playback slot.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    controller.stop_playback().await;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("portfolio-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: AppModel,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Advance the bio title animation and age out stale errors.
        model.tick_interface().await;

        let frame_state = model.frame_state().await;
        terminal.draw(|f| {
            AppView::render(f, &frame_state);
        })?;

        // Short poll keeps the typewriter animation smooth.
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    let _ = controller.handle_key_event(key).await;
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    let _ = controller.handle_mouse_event(mouse, area).await;
                }
                _ => {}
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
