//! # Storage Traits
//!
//! The external store contract: an append/update/subscribe collection of
//! activity records keyed by user. The domain layer only depends on these
//! traits, so any backend that can push ordered snapshots (a cloud
//! document store, the in-memory implementation in [`super::memory`])
//! plugs in without touching business logic.

use anyhow::Result;
use async_trait::async_trait;
use shared::Activity;
use tokio::sync::broadcast;

/// Interface for activity record storage.
///
/// Records handed to `create`/`update` must already be compact: optional
/// fields are omitted from the serialized form, never written as null.
/// The typed model guarantees this at the serde level.
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Store a new record; returns the id it was stored under.
    /// The record must carry its owner in `user_id`.
    async fn create_activity(&self, activity: &Activity) -> Result<String>;

    /// Replace an existing record wholesale. Last write wins; no merge
    /// policy is applied for concurrent editors.
    async fn update_activity(&self, id: &str, activity: &Activity) -> Result<()>;

    /// Delete a record by id. Returns true if it existed.
    async fn delete_activity(&self, user_id: &str, id: &str) -> Result<bool>;

    /// All of a user's records, ordered by `created_at` descending.
    async fn list_activities(&self, user_id: &str) -> Result<Vec<Activity>>;

    /// Subscribe to snapshot pushes for a user. A full, freshly ordered
    /// snapshot is broadcast after every mutation.
    async fn watch_activities(&self, user_id: &str) -> Result<broadcast::Receiver<Vec<Activity>>>;
}

/// Factory for storage repositories, abstracting the connection type the
/// way the domain services expect.
pub trait Connection: Send + Sync + Clone + 'static {
    type ActivityRepository: ActivityStorage;

    fn create_activity_repository(&self) -> Self::ActivityRepository;
}
