//! Local persistence for saved jobs, preferences, and search history.
//!
//! Three independent collections plus the user profile, each serialized
//! as one JSON value under a fixed key. Every operation loads the whole
//! collection, transforms it in memory, and rewrites it; there are no
//! partial writes and no transactions across collections. The
//! load-modify-write pair is not atomic with respect to concurrent
//! callers of the same `JobStore` — acceptable for the single-user,
//! single-caller usage this crate targets. Callers that can race must
//! add their own serialization point in front of the store.

mod backend;
mod sqlite;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use backend::{MemoryBackend, StorageBackend};
pub use sqlite::SqliteBackend;

use crate::models::{JobPosting, UserPreferences, UserProfile};

pub mod keys {
    pub const SAVED_JOBS: &str = "saved_jobs";
    pub const USER_DATA: &str = "user_data";
    pub const PREFERENCES: &str = "user_preferences";
    pub const SEARCH_HISTORY: &str = "search_history";

    pub const ALL: &[&str] = &[SAVED_JOBS, USER_DATA, PREFERENCES, SEARCH_HISTORY];
}

const HISTORY_LIMIT: usize = 10;

pub struct JobStore {
    backend: Arc<dyn StorageBackend>,
}

impl JobStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Upsert keyed solely on id: an existing record with the same id is
    /// fully replaced, anything else is appended. No merge of fields and
    /// no secondary dedup (saving the same real-world job under two ids
    /// stores two records).
    pub async fn save_job(&self, job: &JobPosting) -> Result<()> {
        let mut jobs = self.saved_jobs().await?;
        jobs.retain(|existing| existing.id != job.id);
        jobs.push(job.clone());
        self.write(keys::SAVED_JOBS, &jobs).await
    }

    /// The saved-job list. A missing key or an unparseable stored value
    /// yields an empty list; the parse failure is logged, not surfaced.
    pub async fn saved_jobs(&self) -> Result<Vec<JobPosting>> {
        self.read_collection(keys::SAVED_JOBS).await
    }

    /// Removing an id that is not present rewrites an identical
    /// collection; it is not an error.
    pub async fn remove_job(&self, id: &str) -> Result<()> {
        let mut jobs = self.saved_jobs().await?;
        jobs.retain(|job| job.id != id);
        self.write(keys::SAVED_JOBS, &jobs).await
    }

    /// Most-recent-first, deduplicated, capped at ten entries. Re-adding
    /// an existing query moves it to the front.
    pub async fn save_search_history(&self, query: &str) -> Result<()> {
        let history = self.search_history().await?;
        let mut updated = Vec::with_capacity(HISTORY_LIMIT);
        updated.push(query.to_string());
        updated.extend(history.into_iter().filter(|entry| entry != query));
        updated.truncate(HISTORY_LIMIT);
        self.write(keys::SEARCH_HISTORY, &updated).await
    }

    pub async fn search_history(&self) -> Result<Vec<String>> {
        self.read_collection(keys::SEARCH_HISTORY).await
    }

    pub async fn save_preferences(&self, preferences: &UserPreferences) -> Result<()> {
        self.write(keys::PREFERENCES, preferences).await
    }

    pub async fn preferences(&self) -> Result<Option<UserPreferences>> {
        self.read_value(keys::PREFERENCES).await
    }

    pub async fn save_user(&self, user: &UserProfile) -> Result<()> {
        self.write(keys::USER_DATA, user).await
    }

    pub async fn user(&self) -> Result<Option<UserProfile>> {
        self.read_value(keys::USER_DATA).await
    }

    /// Delete every keyed collection unconditionally.
    pub async fn clear_all(&self) -> Result<()> {
        for key in keys::ALL {
            self.backend.remove(key).await?;
        }
        Ok(())
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = self.backend.get(key).await?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!("discarding unparseable '{key}' collection: {err}");
                Ok(Vec::new())
            }
        }
    }

    async fn read_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = self.backend.get(key).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("discarding unparseable '{key}' value: {err}");
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let serialized =
            serde_json::to_string(value).with_context(|| format!("failed to serialize '{key}'"))?;
        self.backend
            .set(key, &serialized)
            .await
            .with_context(|| format!("failed to persist '{key}'"))
    }
}
