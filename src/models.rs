use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Persisted mapping of set name to ordered folder-id list.
pub type SetsMap = BTreeMap<String, Vec<String>>;

/// A bookmark-tree element. The tag is made explicit here, at the adapter
/// boundary; nothing downstream checks for the presence of a `url` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Folder {
        id: String,
        title: String,
        parent_id: Option<String>,
        children: Vec<Node>,
    },
    Bookmark {
        id: String,
        title: String,
        parent_id: Option<String>,
        url: String,
    },
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Folder { id, .. } | Node::Bookmark { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Node::Folder { title, .. } | Node::Bookmark { title, .. } => title,
        }
    }

    pub fn parent_id(&self) -> Option<&String> {
        match self {
            Node::Folder { parent_id, .. } | Node::Bookmark { parent_id, .. } => {
                parent_id.as_ref()
            }
        }
    }

    pub fn is_bookmark(&self) -> bool {
        matches!(self, Node::Bookmark { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Node::Bookmark { url, .. } => Some(url),
            Node::Folder { .. } => None,
        }
    }

    /// Direct children; empty for bookmarks.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Folder { children, .. } => children,
            Node::Bookmark { .. } => &[],
        }
    }
}

/// An uncommitted set being created or edited. `ids` is the draft's own copy;
/// it reaches the registry only through save. `original` holds the name the
/// set had when editing started, so a save under a new name is a rename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub ids: Vec<String>,
    pub original: Option<String>,
}

impl Draft {
    pub fn create() -> Self {
        Draft { name: String::new(), ids: Vec::new(), original: None }
    }

    pub fn edit(name: &str, ids: &[String]) -> Self {
        Draft {
            name: name.to_string(),
            ids: ids.to_vec(),
            original: Some(name.to_string()),
        }
    }
}

/// Currently displayed folder and its parent. `parent` stays an Option so the
/// id "0" is never mistaken for "no parent".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub current: String,
    pub parent: Option<String>,
}

/// Display row for the folder pane. Counts cover direct children only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRow {
    pub id: String,
    pub title: String,
    pub folder_count: usize,
    pub bookmark_count: usize,
    pub end_of_path: bool,
}

/// One entry of the bounded recent-actions log.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LogEntry {
    pub at: String,
    pub what: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusArea {
    Sets,
    Folders,
    NameInput,
}

/// Row index of the "Random-All" pseudo-entry in the sets pane.
pub const ROW_RANDOM_ALL: usize = 0;

pub struct App {
    pub sets: SetsMap,
    pub focus: FocusArea,
    pub selected_set: usize,
    pub selected_folder: usize,
    pub folders: Vec<FolderRow>,
    pub cursor: Option<Cursor>,
    pub draft: Option<Draft>,
    pub name_input: String,
    pub status: Option<String>,
    pub last_url: Option<String>,
}

impl App {
    pub fn new(sets: SetsMap) -> Self {
        App {
            sets,
            focus: FocusArea::Sets,
            selected_set: ROW_RANDOM_ALL,
            selected_folder: 0,
            folders: Vec::new(),
            cursor: None,
            draft: None,
            name_input: String::new(),
            status: None,
            last_url: None,
        }
    }

    /// Rows in the sets pane: "Random-All", every saved set, "Create New".
    pub fn set_rows(&self) -> usize {
        self.sets.len() + 2
    }

    /// Row index of the "Create New" pseudo-entry.
    pub fn row_create_new(&self) -> usize {
        self.set_rows() - 1
    }

    /// Saved set name at a sets-pane row, None for the pseudo-entries.
    pub fn set_name_at(&self, row: usize) -> Option<&String> {
        if row == ROW_RANDOM_ALL || row == self.row_create_new() {
            return None;
        }
        self.sets.keys().nth(row - 1)
    }

    pub fn editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Leaves the editor, dropping draft and navigation state.
    pub fn close_editor(&mut self) {
        self.draft = None;
        self.cursor = None;
        self.folders.clear();
        self.selected_folder = 0;
        self.name_input.clear();
        self.focus = FocusArea::Sets;
    }
}
