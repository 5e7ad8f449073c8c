use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use serde_json::{Value, json};

use crate::models::{Draft, LogEntry, SetsMap};

/// Store key for the sets map.
pub const SETS_KEY: &str = "saved-sets";
/// Store key for the recent-actions log.
pub const LOG_KEY: &str = "recent-actions";
/// Names taken by the pseudo-entries of the sets pane.
pub const RESERVED_NAMES: [&str; 2] = ["Create New", "Random-All"];
pub const MAX_NAME_LEN: usize = 64;
pub const LOG_CAPACITY: usize = 100;

pub fn store_path() -> PathBuf {
    let mut path = dirs::home_dir().expect("Failed to get home directory");
    path.push(".config");
    path.push("randmark");
    path.push("store.json");
    path
}

// The whole store is one JSON object; every mutation is read-modify-write of
// the full file, so the two keys never clobber each other.
fn read_store(path: &Path) -> Value {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .filter(Value::is_object)
        .unwrap_or_else(|| json!({}))
}

fn write_store(path: &Path, store: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(store)?)?;
    Ok(())
}

/// Loads the persisted sets map. A missing file or key is an empty map.
pub fn load_sets(path: &Path) -> SetsMap {
    match read_store(path).get(SETS_KEY) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_default(),
        None => SetsMap::new(),
    }
}

pub fn persist_sets(path: &Path, sets: &SetsMap) -> Result<()> {
    let mut store = read_store(path);
    store[SETS_KEY] = serde_json::to_value(sets)?;
    write_store(path, &store)
}

/// Why a draft cannot be saved right now. Rendered next to the name input;
/// never raised as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftProblem {
    EmptyName,
    NameTooLong,
    ReservedName,
    NameTaken,
    NoFolders,
}

impl DraftProblem {
    pub fn label(&self) -> &'static str {
        match self {
            DraftProblem::EmptyName => "name is empty",
            DraftProblem::NameTooLong => "name is too long",
            DraftProblem::ReservedName => "name is reserved",
            DraftProblem::NameTaken => "a set with this name exists",
            DraftProblem::NoFolders => "no folders selected",
        }
    }
}

pub fn validate_draft(draft: &Draft, sets: &SetsMap) -> Option<DraftProblem> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Some(DraftProblem::EmptyName);
    }
    if name.len() > MAX_NAME_LEN {
        return Some(DraftProblem::NameTooLong);
    }
    if RESERVED_NAMES.contains(&name) {
        return Some(DraftProblem::ReservedName);
    }
    if sets.contains_key(name) && draft.original.as_deref() != Some(name) {
        return Some(DraftProblem::NameTaken);
    }
    if draft.ids.is_empty() {
        return Some(DraftProblem::NoFolders);
    }
    None
}

/// Adds the folder id if absent, removes it if present. Insertion goes to the
/// end; removal keeps the order of the rest.
pub fn toggle_folder(ids: &mut Vec<String>, folder_id: &str) {
    if let Some(pos) = ids.iter().position(|id| id == folder_id) {
        ids.remove(pos);
    } else {
        ids.push(folder_id.to_string());
    }
}

/// Commits a valid draft into the registry and persists the whole map.
/// Returns false, touching nothing, when validation fails.
pub fn save_draft(path: &Path, sets: &mut SetsMap, draft: &Draft) -> Result<bool> {
    if validate_draft(draft, sets).is_some() {
        return Ok(false);
    }
    let name = draft.name.trim().to_string();
    if let Some(original) = &draft.original {
        if *original != name {
            sets.remove(original);
        }
    }
    sets.insert(name, draft.ids.clone());
    persist_sets(path, sets)?;
    Ok(true)
}

pub fn delete_set(path: &Path, sets: &mut SetsMap, name: &str) -> Result<()> {
    sets.remove(name);
    persist_sets(path, sets)
}

fn parse_at(entry: &LogEntry) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(&entry.at).ok()
}

/// Appends in-capacity, otherwise overwrites the oldest-by-timestamp entry.
pub fn push_entry(log: &mut Vec<LogEntry>, entry: LogEntry) {
    if log.len() < LOG_CAPACITY {
        log.push(entry);
        return;
    }
    let oldest = log
        .iter()
        .enumerate()
        .min_by_key(|(_, e)| parse_at(e))
        .map(|(i, _)| i)
        .unwrap_or(0);
    log[oldest] = entry;
}

pub fn load_log(path: &Path) -> Vec<LogEntry> {
    match read_store(path).get(LOG_KEY) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Records one user action in the bounded recent-actions log.
pub fn record_action(path: &Path, what: &str) -> Result<()> {
    let mut log = load_log(path);
    push_entry(
        &mut log,
        LogEntry { at: Local::now().to_rfc3339(), what: what.to_string() },
    );
    let mut store = read_store(path);
    store[LOG_KEY] = serde_json::to_value(&log)?;
    write_store(path, &store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, ids: &[&str]) -> Draft {
        Draft {
            name: name.to_string(),
            ids: ids.iter().map(|s| s.to_string()).collect(),
            original: None,
        }
    }

    fn temp_store() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        (dir, path)
    }

    #[test]
    fn toggle_twice_restores_order() {
        let mut ids: Vec<String> =
            ["3", "7", "12"].iter().map(|s| s.to_string()).collect();
        let before = ids.clone();
        toggle_folder(&mut ids, "7");
        assert_eq!(ids, vec!["3".to_string(), "12".to_string()]);
        toggle_folder(&mut ids, "7");
        assert_eq!(ids, vec!["3", "12", "7"]);
        toggle_folder(&mut ids, "7");
        toggle_folder(&mut ids, "7");
        assert_eq!(ids, vec!["3", "12", "7"]);
        assert_eq!(ids.len(), before.len());
    }

    #[test]
    fn invalid_drafts_never_reach_the_registry() {
        let (_dir, path) = temp_store();
        let mut sets = SetsMap::new();
        sets.insert("News".to_string(), vec!["3".to_string()]);
        let snapshot = sets.clone();

        for bad in [
            draft("", &["1"]),
            draft(&"x".repeat(MAX_NAME_LEN + 1), &["1"]),
            draft("Create New", &["1"]),
            draft("Random-All", &["1"]),
            draft("News", &["1"]),
            draft("Work", &[]),
        ] {
            assert!(!save_draft(&path, &mut sets, &bad).unwrap());
            assert_eq!(sets, snapshot);
        }
        assert_eq!(load_sets(&path), SetsMap::new());
    }

    #[test]
    fn save_persists_and_rename_drops_the_old_key() {
        let (_dir, path) = temp_store();
        let mut sets = SetsMap::new();
        assert!(save_draft(&path, &mut sets, &draft("News", &["3", "5"])).unwrap());
        assert_eq!(load_sets(&path).get("News").unwrap(), &vec!["3", "5"]);

        let mut renamed = draft("Press", &["3", "5"]);
        renamed.original = Some("News".to_string());
        assert!(save_draft(&path, &mut sets, &renamed).unwrap());
        let reloaded = load_sets(&path);
        assert!(!reloaded.contains_key("News"));
        assert_eq!(reloaded.get("Press").unwrap(), &vec!["3", "5"]);
    }

    #[test]
    fn editing_under_the_same_name_is_not_a_collision() {
        let mut sets = SetsMap::new();
        sets.insert("News".to_string(), vec!["3".to_string()]);
        let mut d = draft("News", &["3", "9"]);
        d.original = Some("News".to_string());
        assert_eq!(validate_draft(&d, &sets), None);
    }

    #[test]
    fn delete_then_save_same_name_is_a_plain_create() {
        let (_dir, path) = temp_store();
        let mut sets = SetsMap::new();
        assert!(save_draft(&path, &mut sets, &draft("News", &["3"])).unwrap());
        delete_set(&path, &mut sets, "News").unwrap();
        assert!(!load_sets(&path).contains_key("News"));

        assert!(save_draft(&path, &mut sets, &draft("News", &["8"])).unwrap());
        assert_eq!(load_sets(&path).get("News").unwrap(), &vec!["8"]);
    }

    #[test]
    fn log_overwrites_oldest_once_full() {
        let mut log = Vec::new();
        for i in 0..LOG_CAPACITY {
            push_entry(
                &mut log,
                LogEntry {
                    at: format!("2026-08-30T10:{:02}:{:02}+00:00", i / 60, i % 60),
                    what: format!("action {i}"),
                },
            );
        }
        assert_eq!(log.len(), LOG_CAPACITY);

        push_entry(
            &mut log,
            LogEntry {
                at: "2026-08-30T12:00:00+00:00".to_string(),
                what: "latest".to_string(),
            },
        );
        assert_eq!(log.len(), LOG_CAPACITY);
        assert!(!log.iter().any(|e| e.what == "action 0"));
        assert!(log.iter().any(|e| e.what == "latest"));
    }

    #[test]
    fn action_log_round_trips_next_to_the_sets_map() {
        let (_dir, path) = temp_store();
        let mut sets = SetsMap::new();
        save_draft(&path, &mut sets, &draft("News", &["3"])).unwrap();
        record_action(&path, "opened http://a").unwrap();

        assert_eq!(load_log(&path).len(), 1);
        // the sets key survived the log write
        assert!(load_sets(&path).contains_key("News"));
    }
}
