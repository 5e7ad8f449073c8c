use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::warn;

use crate::models::{App, Cursor, FolderRow, Node};

/// Synthetic id for the root that groups the Chromium root folders. Chromium
/// itself numbers the bookmark bar "1", so "0" is free and matches what the
/// browser reports as the roots' parent.
pub const ROOT_ID: &str = "0";

// Raw shape of the Chromium `Bookmarks` file. The file does not record parent
// ids; those are derived during conversion.
#[derive(Deserialize)]
struct BookmarksFile {
    roots: Roots,
}

#[derive(Deserialize)]
struct Roots {
    bookmark_bar: Option<RawNode>,
    other: Option<RawNode>,
    synced: Option<RawNode>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    url: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
}

fn convert(raw: RawNode, parent_id: Option<&str>) -> Node {
    let parent_id = parent_id.map(str::to_string);
    if raw.kind == "url" {
        Node::Bookmark {
            id: raw.id,
            title: raw.name,
            parent_id,
            url: raw.url.unwrap_or_default(),
        }
    } else {
        let id = raw.id;
        let children = raw
            .children
            .into_iter()
            .map(|child| convert(child, Some(id.as_str())))
            .collect();
        Node::Folder { id, title: raw.name, parent_id, children }
    }
}

fn find<'a>(node: &'a Node, id: &str) -> Option<&'a Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children().iter().find_map(|child| find(child, id))
}

/// Read-only view of the browser's bookmark forest, loaded once at startup.
pub struct BookmarkStore {
    root: Node,
}

impl BookmarkStore {
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("could not read bookmarks file {}", path.display()))?;
        let file: BookmarksFile = serde_json::from_str(&raw)
            .with_context(|| format!("could not parse bookmarks file {}", path.display()))?;

        let children = [file.roots.bookmark_bar, file.roots.other, file.roots.synced]
            .into_iter()
            .flatten()
            .map(|raw| convert(raw, Some(ROOT_ID)))
            .collect();
        Ok(Self::from_root(Node::Folder {
            id: ROOT_ID.to_string(),
            title: "Bookmarks".to_string(),
            parent_id: None,
            children,
        }))
    }

    pub fn from_root(root: Node) -> Self {
        BookmarkStore { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn subtree(&self, id: &str) -> Option<&Node> {
        find(&self.root, id)
    }

    /// Direct children of a folder. Async so multiple lookups can be joined
    /// in one aggregation by the picker.
    pub async fn children(&self, id: &str) -> Result<Vec<Node>> {
        match self.subtree(id) {
            Some(node) => Ok(node.children().to_vec()),
            None => bail!("unknown folder id {id}"),
        }
    }
}

/// One-level folder/bookmark counts of a node's direct children.
pub fn direct_counts(node: &Node) -> (usize, usize) {
    let mut folders = 0;
    let mut bookmarks = 0;
    for child in node.children() {
        if child.is_bookmark() {
            bookmarks += 1;
        } else {
            folders += 1;
        }
    }
    (folders, bookmarks)
}

/// Display rows for a folder's folder-children. Bookmarks among the children
/// are counted but never listed.
pub fn folder_rows(node: &Node) -> Vec<FolderRow> {
    node.children()
        .iter()
        .filter(|child| !child.is_bookmark())
        .map(|child| {
            let (folder_count, bookmark_count) = direct_counts(child);
            FolderRow {
                id: child.id().to_string(),
                title: child.title().to_string(),
                folder_count,
                bookmark_count,
                end_of_path: folder_count == 0,
            }
        })
        .collect()
}

/// Replaces the folder pane with `id`'s folder-children and moves the cursor.
/// An unknown id or a childless folder leaves navigation state untouched.
pub fn open_folder(store: &BookmarkStore, app: &mut App, id: &str) {
    match store.subtree(id) {
        Some(node) if !node.children().is_empty() => {
            app.folders = folder_rows(node);
            app.cursor = Some(Cursor {
                current: id.to_string(),
                parent: node.parent_id().cloned(),
            });
            app.selected_folder = 0;
        }
        _ => warn!("folder lookup for id {id} came back empty, staying put"),
    }
}

/// Moves one level up. No-op at the root, where the cursor has no parent.
pub fn go_up(store: &BookmarkStore, app: &mut App) {
    if let Some(parent) = app.cursor.as_ref().and_then(|c| c.parent.clone()) {
        open_folder(store, app, &parent);
    }
}

static PROFILE_CANDIDATES: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    let mut candidates = Vec::new();
    if let Some(config) = dirs::config_dir() {
        for browser in [
            "google-chrome",
            "chromium",
            "BraveSoftware/Brave-Browser",
            "Google/Chrome",
        ] {
            candidates.push(config.join(browser).join("Default").join("Bookmarks"));
        }
    }
    candidates
});

/// First well-known Chromium profile path that exists on this machine.
pub fn locate_bookmarks_file() -> Option<PathBuf> {
    PROFILE_CANDIDATES.iter().find(|p| p.exists()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(id: &str, parent: &str, url: &str) -> Node {
        Node::Bookmark {
            id: id.to_string(),
            title: format!("bm-{id}"),
            parent_id: Some(parent.to_string()),
            url: url.to_string(),
        }
    }

    fn folder(id: &str, parent: Option<&str>, children: Vec<Node>) -> Node {
        Node::Folder {
            id: id.to_string(),
            title: format!("folder-{id}"),
            parent_id: parent.map(str::to_string),
            children,
        }
    }

    fn sample_store() -> BookmarkStore {
        // 0 ── 1 ── a.example, 2 ── 3 (empty)
        BookmarkStore::from_root(folder(
            "0",
            None,
            vec![
                folder("1", Some("0"), vec![bookmark("4", "1", "http://a.example")]),
                folder(
                    "2",
                    Some("0"),
                    vec![folder("3", Some("2"), vec![])],
                ),
            ],
        ))
    }

    #[test]
    fn chromium_file_gets_explicit_tags_and_parents() {
        let raw = r#"{
            "roots": {
                "bookmark_bar": {
                    "id": "1", "name": "Bookmarks bar", "type": "folder",
                    "children": [
                        {"id": "5", "name": "a", "type": "url", "url": "http://a"},
                        {"id": "6", "name": "sub", "type": "folder", "children": []}
                    ]
                },
                "other": {"id": "2", "name": "Other", "type": "folder", "children": []}
            }
        }"#;
        let file: BookmarksFile = serde_json::from_str(raw).unwrap();
        let bar = convert(file.roots.bookmark_bar.unwrap(), Some(ROOT_ID));
        assert_eq!(bar.parent_id(), Some(&ROOT_ID.to_string()));
        let children = bar.children();
        assert!(children[0].is_bookmark());
        assert_eq!(children[0].url(), Some("http://a"));
        assert_eq!(children[0].parent_id(), Some(&"1".to_string()));
        assert!(!children[1].is_bookmark());
        assert_eq!(children[1].parent_id(), Some(&"1".to_string()));
    }

    #[test]
    fn rows_list_folders_only_with_one_level_counts() {
        let store = sample_store();
        let rows = folder_rows(store.root());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].folder_count, 0);
        assert_eq!(rows[0].bookmark_count, 1);
        assert!(rows[0].end_of_path);
        assert_eq!(rows[1].folder_count, 1);
        assert_eq!(rows[1].bookmark_count, 0);
        assert!(!rows[1].end_of_path);
    }

    #[test]
    fn open_folder_moves_cursor_and_keeps_zero_parent_distinct() {
        let store = sample_store();
        let mut app = App::new(Default::default());
        open_folder(&store, &mut app, "2");
        let cursor = app.cursor.as_ref().unwrap();
        assert_eq!(cursor.current, "2");
        // parent "0" is a real id, not "absent"
        assert_eq!(cursor.parent.as_deref(), Some("0"));

        go_up(&store, &mut app);
        let cursor = app.cursor.as_ref().unwrap();
        assert_eq!(cursor.current, "0");
        assert_eq!(cursor.parent, None);

        // at the root up is a no-op
        go_up(&store, &mut app);
        assert_eq!(app.cursor.as_ref().unwrap().current, "0");
    }

    #[test]
    fn bad_or_empty_lookup_leaves_navigation_unchanged() {
        let store = sample_store();
        let mut app = App::new(Default::default());
        open_folder(&store, &mut app, "1");
        let before = app.cursor.clone();

        open_folder(&store, &mut app, "999");
        assert_eq!(app.cursor, before);

        // folder "3" exists but has no children at all
        open_folder(&store, &mut app, "3");
        assert_eq!(app.cursor, before);
    }

    #[tokio::test]
    async fn children_errors_on_unknown_id() {
        let store = sample_store();
        assert_eq!(store.children("1").await.unwrap().len(), 1);
        assert!(store.children("999").await.is_err());
    }
}
