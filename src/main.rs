// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal,
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

mod bookmarks;
mod config;
mod input;
mod models;
mod picker;
mod sets;
mod theme;
mod ui;

use crate::models::App;
use crate::theme::Theme;

#[derive(Parser)]
#[command(name = "randmark", version, about = "Random bookmarks from folder sets")]
struct Args {
    /// Path to a Chromium-family Bookmarks file
    #[arg(long)]
    bookmarks: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = config::Settings::new()?;
    let _log_guard = init_tracing(settings.log_level.as_deref())?;

    let bookmarks_path = args
        .bookmarks
        .or_else(|| settings.bookmarks_file())
        .or_else(bookmarks::locate_bookmarks_file);
    let Some(bookmarks_path) = bookmarks_path else {
        bail!(
            "no Bookmarks file found; pass --bookmarks or set bookmarks_path in {}",
            config::get_user_config_path().display()
        );
    };

    let rt = Runtime::new()?;
    let store = rt.block_on(bookmarks::BookmarkStore::load(&bookmarks_path))?;
    let store_path = sets::store_path();
    let mut app = App::new(sets::load_sets(&store_path));
    let theme = Theme::default();

    terminal::enable_raw_mode()?;
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| {
            ui::render(f, &app, &store, &theme);
        })?;

        if event::poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                if !input::handle_key(key_event.code, &mut app, &store, &store_path, &rt)? {
                    break;
                }
            }
        }
    }

    terminal::disable_raw_mode()?;
    Ok(())
}

fn init_tracing(level: Option<&str>) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = config::get_log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, "randmark.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or("randmark=info")))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}
