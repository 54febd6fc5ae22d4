use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ChatId;

/// Membership tracking seam between the router and its storage.
///
/// `SubscriberStore` is the durable implementation; tests substitute an
/// in-memory fake.
pub trait SubscriptionStore: Send + Sync {
    /// Insert `id`. `true` if it was newly added, `false` if already present.
    fn add(&self, id: ChatId) -> bool;
    /// Delete `id`. `true` if it was present, `false` if already absent.
    fn remove(&self, id: ChatId) -> bool;
    fn contains(&self, id: ChatId) -> bool;
    fn count(&self) -> usize;
    /// Snapshot copy of the current set.
    fn all(&self) -> HashSet<ChatId>;
}

/// Durable set of notification subscribers.
///
/// The file on disk always holds the full set; every membership change
/// rewrites it before the mutating call returns. The in-memory set is the
/// source of truth for reads, the mutex covers the whole read-modify-persist
/// sequence so persisted state never regresses relative to a completed
/// mutation.
pub struct SubscriberStore {
    path: PathBuf,
    subscribers: Mutex<HashSet<ChatId>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSet {
    #[serde(default)]
    subscribers: Vec<i64>,
}

impl SubscriberStore {
    /// Open the store backed by `path`, loading whatever is already there.
    ///
    /// A missing file means an empty set. An unreadable or unparsable file
    /// also means an empty set: corruption is logged, never surfaced.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("failed to create state directory {}: {e}", parent.display());
                }
            }
        }

        let subscribers = load_set(&path);
        Self {
            path,
            subscribers: Mutex::new(subscribers),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<ChatId>> {
        self.subscribers.lock().expect("subscriber set lock poisoned")
    }

    /// Rewrite the durable file with the full current set.
    ///
    /// Writes a sibling temp file first and renames it into place, so a
    /// crash mid-write leaves the previous good file untouched. A failed
    /// write is logged; the in-memory mutation stands either way.
    fn persist(&self, set: &HashSet<ChatId>) {
        let stored = StoredSet {
            subscribers: set.iter().map(|id| id.0).collect(),
        };

        let json = match serde_json::to_string_pretty(&stored) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize subscribers: {e}");
                return;
            }
        };

        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path)) {
            warn!("failed to save subscribers to {}: {e}", self.path.display());
        }
    }
}

impl SubscriptionStore for SubscriberStore {
    fn add(&self, id: ChatId) -> bool {
        let mut set = self.lock();
        if !set.insert(id) {
            return false;
        }
        self.persist(&set);
        true
    }

    fn remove(&self, id: ChatId) -> bool {
        let mut set = self.lock();
        if !set.remove(&id) {
            return false;
        }
        self.persist(&set);
        true
    }

    fn contains(&self, id: ChatId) -> bool {
        self.lock().contains(&id)
    }

    fn count(&self) -> usize {
        self.lock().len()
    }

    fn all(&self) -> HashSet<ChatId> {
        self.lock().clone()
    }
}

fn load_set(path: &Path) -> HashSet<ChatId> {
    if !path.exists() {
        return HashSet::new();
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("failed to read subscribers from {}: {e}", path.display());
            return HashSet::new();
        }
    };

    match serde_json::from_str::<StoredSet>(&text) {
        Ok(stored) => stored.subscribers.into_iter().map(ChatId).collect(),
        Err(e) => {
            warn!("failed to parse subscribers from {}: {e}", path.display());
            HashSet::new()
        }
    }
}
