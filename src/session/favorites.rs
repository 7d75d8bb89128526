/// Favorites management
///
/// Favorites are an ordered list of store references, kept per user and
/// persisted as one key per line in `favorites_{user}.txt`. Keys that no
/// longer resolve against the store are dropped silently on load.

use crate::error::{Result, ScoutError};
use crate::session::Session;
use crate::store::Store;
use std::path::PathBuf;

impl Session {
    /// Add the listing at a 1-based result index to the favorites.
    /// Adding the same listing twice is an idempotent no-op.
    pub fn add_favorite(&mut self, index: usize) -> Result<String> {
        if !self.has_results() {
            return Err(ScoutError::State(
                "Please list or filter properties first, then favorite by their number."
                    .to_string(),
            ));
        }
        let id = self
            .result_at(index)
            .ok_or_else(|| ScoutError::Validation("Invalid property number.".to_string()))?;

        if self.favorites().contains(&id) {
            return Ok(format!("Property #{} is already in your favorites.", index));
        }
        self.favorites_mut().push(id);
        Ok(format!("Added property #{} to your favorites.", index))
    }

    /// Remove the favorite at a 1-based index into the favorites list.
    pub fn remove_favorite(&mut self, index: usize) -> Result<String> {
        let slot = index
            .checked_sub(1)
            .filter(|&i| i < self.favorites().len())
            .ok_or_else(|| ScoutError::Validation("Invalid favorite number.".to_string()))?;

        self.favorites_mut().remove(slot);
        Ok(format!("Removed property #{} from your favorites.", index))
    }

    /// Path of the current user's favorites file.
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir().join(format!("favorites_{}.txt", self.user()))
    }

    /// Persist favorites, one store key per line.
    pub async fn save_favorites(&self, store: &Store) -> Result<String> {
        let mut contents = String::new();
        for &id in self.favorites() {
            contents.push_str(store.key(id));
            contents.push('\n');
        }
        tokio::fs::write(self.favorites_path(), contents).await?;
        Ok("Favorites saved.".to_string())
    }

    /// Load favorites for the current user, replacing the in-memory
    /// list. Keys that no longer resolve are dropped. A missing file is
    /// the distinct not-found signal, not a failure: favorites end up
    /// empty and the session carries on.
    pub async fn load_favorites(&mut self, store: &Store) -> Result<String> {
        let path = self.favorites_path();
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.favorites_mut().clear();
                return Err(ScoutError::NotFound("No favorites file found.".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut favorites = Vec::new();
        for key in contents.lines().map(str::trim).filter(|k| !k.is_empty()) {
            match store.resolve(key) {
                Some(id) => favorites.push(id),
                None => tracing::debug!("dropping stale favorite key '{}'", key),
            }
        }
        *self.favorites_mut() = favorites;
        Ok("Favorites loaded.".to_string())
    }

    /// Switch to another user: favorites reset, then a best-effort load
    /// of that user's file. A failed load leaves the list empty.
    pub async fn switch_user(&mut self, store: &Store, name: &str) -> Result<String> {
        self.set_user(name);
        self.favorites_mut().clear();
        if let Err(e) = self.load_favorites(store).await {
            tracing::debug!("no favorites restored for '{}': {}", name, e);
        }
        Ok(format!("Switched to user {}.", name))
    }
}
