// Flat-file store module
// JSON persistence for the bestiary and review collections under data_dir

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::logger;
use crate::model::{Monster, Review};

const BESTIARY_FILE: &str = "monsters.json";
const REVIEWS_FILE: &str = "reviews.json";

/// Outcome of reading a persisted collection
///
/// Missing and corrupt files both fall back to the empty collection;
/// the distinction exists so corrupt files can be logged instead of
/// silently swallowed.
enum StoreLoad<T> {
    Loaded(Vec<T>),
    Missing,
    Corrupt(String),
}

/// Read a JSON array file into a collection
fn read_json_array<T: DeserializeOwned>(path: &Path) -> StoreLoad<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoreLoad::Missing,
        Err(e) => return StoreLoad::Corrupt(e.to_string()),
    };

    match serde_json::from_str(&content) {
        Ok(items) => StoreLoad::Loaded(items),
        Err(e) => StoreLoad::Corrupt(e.to_string()),
    }
}

/// Resolve a load result to a collection, logging corrupt files
fn unwrap_or_empty<T>(load: StoreLoad<T>, path: &Path) -> Vec<T> {
    match load {
        StoreLoad::Loaded(items) => items,
        StoreLoad::Missing => Vec::new(),
        StoreLoad::Corrupt(reason) => {
            logger::log_error(&format!(
                "Unreadable store file {}: {reason} (treating as empty)",
                path.display()
            ));
            Vec::new()
        }
    }
}

/// Write a collection to a JSON file, creating the parent directory on demand
fn write_json_array<T: Serialize>(path: &Path, items: &[T], pretty: bool) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }

    let json = if pretty {
        serde_json::to_string_pretty(items)
    } else {
        serde_json::to_string(items)
    }
    .map_err(|e| format!("Failed to serialize {}: {e}", path.display()))?;

    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Bestiary file store
///
/// Mutated only by the admin console operations; the running web handlers
/// never write it.
pub struct BestiaryStore {
    path: PathBuf,
}

impl BestiaryStore {
    pub fn new(data_dir: &str) -> Self {
        Self {
            path: Path::new(data_dir).join(BESTIARY_FILE),
        }
    }

    /// Load the persisted bestiary; missing or corrupt files yield an empty list
    pub fn load(&self) -> Vec<Monster> {
        unwrap_or_empty(read_json_array(&self.path), &self.path)
    }

    /// Persist the full bestiary, pretty-printed
    pub fn save(&self, monsters: &[Monster]) -> Result<(), String> {
        write_json_array(&self.path, monsters, true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Review file store
///
/// Reviews are loaded fresh on every request and rewritten in full on
/// every submission. Submissions serialize through `write_lock` so
/// concurrent posts cannot drop each other's writes.
pub struct ReviewStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReviewStore {
    pub fn new(data_dir: &str) -> Self {
        Self {
            path: Path::new(data_dir).join(REVIEWS_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the persisted reviews; missing or corrupt files yield an empty list
    pub fn load(&self) -> Vec<Review> {
        unwrap_or_empty(read_json_array(&self.path), &self.path)
    }

    /// Append a review and persist the full collection
    ///
    /// Returns the updated collection so the caller can render it without
    /// a second read.
    pub async fn append(&self, review: Review) -> Result<Vec<Review>, String> {
        let _guard = self.write_lock.lock().await;

        let mut reviews = self.load();
        reviews.push(review);
        write_json_array(&self.path, &reviews, false)?;
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_bestiary_missing_file_loads_empty() {
        let (_dir, data) = data_dir();
        let store = BestiaryStore::new(&data);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_bestiary_corrupt_file_loads_empty() {
        let (_dir, data) = data_dir();
        let store = BestiaryStore::new(&data);
        fs::create_dir_all(Path::new(&data)).unwrap();
        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_bestiary_save_and_load_round_trip() {
        let (_dir, data) = data_dir();
        let store = BestiaryStore::new(&data);
        let bestiary = crate::model::default_bestiary();

        store.save(&bestiary).unwrap();
        assert_eq!(store.load(), bestiary);

        // Pretty-printed on disk
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));
    }

    #[tokio::test]
    async fn test_review_append_preserves_all_fields() {
        let (_dir, data) = data_dir();
        let store = ReviewStore::new(&data);

        let review = Review {
            quest: "Find Ciri".to_string(),
            rating: 5,
            comment: "Long road".to_string(),
            author: "Wolf".to_string(),
        };

        let updated = store.append(review.clone()).await.unwrap();
        assert_eq!(updated, vec![review.clone()]);
        assert_eq!(store.load(), vec![review]);
    }

    #[tokio::test]
    async fn test_review_append_keeps_existing_entries() {
        let (_dir, data) = data_dir();
        let store = ReviewStore::new(&data);

        let first = Review {
            quest: "q1".to_string(),
            rating: 3,
            comment: "ok".to_string(),
            author: "Anonymous".to_string(),
        };
        let second = Review {
            quest: "q2".to_string(),
            rating: 4,
            comment: "better".to_string(),
            author: "Griffin".to_string(),
        };

        store.append(first.clone()).await.unwrap();
        let updated = store.append(second.clone()).await.unwrap();
        assert_eq!(updated, vec![first, second]);
    }
}
