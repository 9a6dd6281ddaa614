pub mod app;
pub mod components;
pub mod config;
pub mod contact;
pub mod content;
pub mod definitions;
pub mod error;
pub mod event;
pub mod gate;
pub mod i18n;
pub mod logging;
pub mod preferences;
pub mod tui;
pub mod ui;

use anyhow::{Context, Result};
use app::App;
use config::PortalSettings;
use crossterm::event::{Event as CrosstermEvent, EventStream};
use event::Event;
use futures_util::StreamExt;
use log::{debug, info, warn};
use tui::{Tui, finish, init, restore};
use ui::render;

#[tokio::main]
async fn main() -> Result<()> {
    let root = std::env::current_dir().context("Failed to resolve working directory")?;
    let settings = PortalSettings::load(&root)?;
    if let Err(err) = logging::init(&root, &settings) {
        // Logging is optional; the UI still works without it.
        eprintln!("policy-portal: logging disabled: {err:#}");
    }
    info!("Starting policy-portal in {}", root.display());

    let mut app = App::new(settings)?;
    let mut tui = init()?;
    let result = finish(run(&mut tui, &mut app).await, restore);
    info!("policy-portal exited");
    result
}

async fn run(tui: &mut Tui, app: &mut App) -> Result<()> {
    let mut stream = EventStream::new();

    while !app.should_quit {
        tui.draw(|frame| render(frame, app))
            .context("Failed to draw frame")?;

        let event = match stream.next().await {
            Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
            Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
            Some(Ok(CrosstermEvent::Resize(width, height))) => Event::Resize(width, height),
            // Focus and paste events carry nothing for us.
            Some(Ok(_)) => continue,
            Some(Err(err)) => {
                warn!("Terminal event stream failed: {}", err);
                break;
            }
            None => break,
        };

        match event {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(width, height) => debug!("Resized to {}x{}", width, height),
        }
    }
    Ok(())
}
