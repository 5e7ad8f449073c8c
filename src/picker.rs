use futures::future::join_all;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::bookmarks::BookmarkStore;
use crate::models::Node;

/// Bookmark leaves directly under the set's folders. The per-folder lookups
/// run as one join; a failed id drops out without taking the rest with it.
pub async fn collect_from_set(store: &BookmarkStore, ids: &[String]) -> Vec<Node> {
    let fetches = ids.iter().map(|id| store.children(id));
    let mut bookmarks = Vec::new();
    for (id, result) in ids.iter().zip(join_all(fetches).await) {
        match result {
            Ok(children) => {
                bookmarks.extend(children.into_iter().filter(Node::is_bookmark))
            }
            Err(err) => warn!("skipping folder {id} during random pick: {err}"),
        }
    }
    bookmarks
}

/// Every bookmark leaf in the store, found by walking a stack of pending
/// folders until none remain.
pub fn collect_all(store: &BookmarkStore) -> Vec<Node> {
    let mut bookmarks = Vec::new();
    let mut pending = vec![store.root()];
    while let Some(node) = pending.pop() {
        for child in node.children() {
            if child.is_bookmark() {
                bookmarks.push(child.clone());
            } else {
                pending.push(child);
            }
        }
    }
    bookmarks
}

/// Uniform choice over the candidates, index always in [0, n). None for an
/// empty slice.
pub fn choose_url(candidates: &[Node]) -> Option<String> {
    candidates
        .choose(&mut rand::thread_rng())
        .and_then(Node::url)
        .map(str::to_string)
}

pub async fn pick_from_set(store: &BookmarkStore, ids: &[String]) -> Option<String> {
    let candidates = collect_from_set(store, ids).await;
    choose_url(&candidates)
}

pub fn pick_from_all(store: &BookmarkStore) -> Option<String> {
    let candidates = collect_all(store);
    choose_url(&candidates)
}

/// Opens the URL in the default browser, fire-and-forget. Failures go to the
/// log only.
pub fn open_url(url: &str) {
    info!("opening {url}");
    if let Err(err) = open::that_detached(url) {
        warn!("failed to open {url}: {err}");
    }
}
