use std::path::Path;

use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::KeyCode;
use tokio::runtime::Runtime;
use tracing::warn;

use crate::bookmarks::{self, BookmarkStore, ROOT_ID};
use crate::models::{App, Draft, FocusArea, ROW_RANDOM_ALL};
use crate::picker;
use crate::sets;

/// Handles one key press. Returns Ok(false) when the app should quit.
pub fn handle_key(
    key: KeyCode,
    app: &mut App,
    store: &BookmarkStore,
    store_path: &Path,
    rt: &Runtime,
) -> Result<bool> {
    match app.focus {
        FocusArea::Sets => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if app.selected_set > 0 {
                    app.selected_set -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.selected_set + 1 < app.set_rows() {
                    app.selected_set += 1;
                }
            }
            KeyCode::Enter => {
                if app.selected_set == ROW_RANDOM_ALL {
                    pick_all(app, store, store_path);
                } else if app.selected_set == app.row_create_new() {
                    app.draft = Some(Draft::create());
                    app.name_input.clear();
                    bookmarks::open_folder(store, app, ROOT_ID);
                    app.focus = FocusArea::Folders;
                } else if let Some(name) = app.set_name_at(app.selected_set).cloned() {
                    pick_set(app, store, store_path, rt, &name);
                }
            }
            KeyCode::Char('e') => {
                if let Some(name) = app.set_name_at(app.selected_set).cloned() {
                    let ids = app.sets.get(&name).cloned().unwrap_or_default();
                    app.draft = Some(Draft::edit(&name, &ids));
                    app.name_input = name;
                    bookmarks::open_folder(store, app, ROOT_ID);
                    app.focus = FocusArea::Folders;
                }
            }
            KeyCode::Char('d') => {
                if let Some(name) = app.set_name_at(app.selected_set).cloned() {
                    sets::delete_set(store_path, &mut app.sets, &name)?;
                    record(store_path, &format!("deleted set {name}"));
                    app.status = Some(format!("Deleted set '{name}'"));
                    if app.selected_set + 1 >= app.set_rows() {
                        app.selected_set = app.set_rows() - 1;
                    }
                }
            }
            KeyCode::Char('y') => copy_last_url(app),
            KeyCode::Char('q') => return Ok(false),
            _ => {}
        },
        FocusArea::Folders => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if app.selected_folder > 0 {
                    app.selected_folder -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.selected_folder + 1 < app.folders.len() {
                    app.selected_folder += 1;
                }
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                // end-of-path folders have nothing to drill into
                let target = app
                    .folders
                    .get(app.selected_folder)
                    .filter(|row| !row.end_of_path)
                    .map(|row| row.id.clone());
                if let Some(id) = target {
                    bookmarks::open_folder(store, app, &id);
                }
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('u') => {
                bookmarks::go_up(store, app);
            }
            KeyCode::Char(' ') => {
                let id = app.folders.get(app.selected_folder).map(|row| row.id.clone());
                if let (Some(draft), Some(id)) = (app.draft.as_mut(), id) {
                    sets::toggle_folder(&mut draft.ids, &id);
                }
            }
            KeyCode::Char('s') => {
                if let Some(draft) = &app.draft {
                    app.name_input = draft.name.clone();
                }
                app.focus = FocusArea::NameInput;
            }
            KeyCode::Esc => {
                app.close_editor();
                app.status = Some("Edit cancelled".to_string());
            }
            KeyCode::Char('q') => return Ok(false),
            _ => {}
        },
        FocusArea::NameInput => match key {
            KeyCode::Enter => {
                let Some(mut draft) = app.draft.clone() else {
                    app.focus = FocusArea::Sets;
                    return Ok(true);
                };
                draft.name = app.name_input.trim().to_string();
                // invalid drafts keep the popup open; the verdict line says why
                if sets::save_draft(store_path, &mut app.sets, &draft)? {
                    record(store_path, &format!("saved set {}", draft.name));
                    app.status = Some(format!("Saved set '{}'", draft.name.trim()));
                    app.close_editor();
                }
            }
            KeyCode::Backspace => {
                app.name_input.pop();
            }
            KeyCode::Esc => {
                // keep the typed name so reopening the popup resumes it
                if let Some(draft) = app.draft.as_mut() {
                    draft.name = app.name_input.clone();
                }
                app.focus = FocusArea::Folders;
            }
            KeyCode::Char(c) => app.name_input.push(c),
            _ => {}
        },
    }
    Ok(true)
}

fn pick_set(app: &mut App, store: &BookmarkStore, store_path: &Path, rt: &Runtime, name: &str) {
    let ids = app.sets.get(name).cloned().unwrap_or_default();
    match rt.block_on(picker::pick_from_set(store, &ids)) {
        Some(url) => {
            picker::open_url(&url);
            record(store_path, &format!("random pick from {name}: {url}"));
            app.status = Some(format!("Opened {url}"));
            app.last_url = Some(url);
        }
        None => app.status = Some(format!("No bookmarks found in '{name}'")),
    }
}

fn pick_all(app: &mut App, store: &BookmarkStore, store_path: &Path) {
    match picker::pick_from_all(store) {
        Some(url) => {
            picker::open_url(&url);
            record(store_path, &format!("random pick from all: {url}"));
            app.status = Some(format!("Opened {url}"));
            app.last_url = Some(url);
        }
        None => app.status = Some("No bookmarks found".to_string()),
    }
}

fn copy_last_url(app: &mut App) {
    if let Some(url) = app.last_url.clone() {
        let mut clipboard = Clipboard::new().ok();
        if let Some(cb) = clipboard.as_mut() {
            let _ = cb.set_text(url);
            app.status = Some("Copied last URL to clipboard".to_string());
        }
    }
}

// The action log is best effort; a failed write never interrupts the action
// it records.
fn record(store_path: &Path, what: &str) {
    if let Err(err) = sets::record_action(store_path, what) {
        warn!("could not record action '{what}': {err}");
    }
}
