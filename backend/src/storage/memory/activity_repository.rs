//! Activity repository over the in-memory store.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, warn};
use shared::Activity;
use tokio::sync::broadcast;

use crate::storage::traits::ActivityStorage;

use super::MemoryConnection;

pub struct ActivityRepository {
    connection: MemoryConnection,
}

impl ActivityRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Ordering key: newest first, records with a malformed `created_at`
    /// sink to the end rather than poisoning the sort.
    fn order_key(activity: &Activity) -> i64 {
        activity
            .created_at()
            .map(|t| t.timestamp_millis())
            .unwrap_or(i64::MIN)
    }

    fn sort_snapshot(records: &mut [Activity]) {
        records.sort_by_key(|a| std::cmp::Reverse(Self::order_key(a)));
    }

    async fn publish(&self, user_id: &str, snapshot: Vec<Activity>) {
        let sender = self.connection.inner.sender_for(user_id).await;
        // A send error just means nobody is watching right now.
        if sender.send(snapshot).is_err() {
            debug!("no live subscribers for user {}", user_id);
        }
    }

    fn owner_of(activity: &Activity) -> Result<&str> {
        activity
            .base()
            .user_id
            .as_deref()
            .ok_or_else(|| anyhow!("record {} is missing its owner", activity.base().id))
    }
}

#[async_trait]
impl ActivityStorage for ActivityRepository {
    async fn create_activity(&self, activity: &Activity) -> Result<String> {
        let user_id = Self::owner_of(activity)?.to_string();
        let id = activity.base().id.clone();

        let snapshot = {
            let mut entries = self.connection.inner.entries.write().await;
            let records = entries.entry(user_id.clone()).or_default();
            if records.iter().any(|r| r.base().id == id) {
                return Err(anyhow!("record {} already exists", id));
            }
            records.push(activity.clone());
            Self::sort_snapshot(records);
            records.clone()
        };

        self.publish(&user_id, snapshot).await;
        Ok(id)
    }

    async fn update_activity(&self, id: &str, activity: &Activity) -> Result<()> {
        let user_id = Self::owner_of(activity)?.to_string();

        let snapshot = {
            let mut entries = self.connection.inner.entries.write().await;
            let records = entries
                .get_mut(&user_id)
                .ok_or_else(|| anyhow!("no records stored for user {}", user_id))?;
            let slot = records
                .iter_mut()
                .find(|r| r.base().id == id)
                .ok_or_else(|| anyhow!("no record with id {}", id))?;
            *slot = activity.clone();
            Self::sort_snapshot(records);
            records.clone()
        };

        self.publish(&user_id, snapshot).await;
        Ok(())
    }

    async fn delete_activity(&self, user_id: &str, id: &str) -> Result<bool> {
        let (existed, snapshot) = {
            let mut entries = self.connection.inner.entries.write().await;
            let Some(records) = entries.get_mut(user_id) else {
                return Ok(false);
            };
            let before = records.len();
            records.retain(|r| r.base().id != id);
            (records.len() < before, records.clone())
        };

        if existed {
            self.publish(user_id, snapshot).await;
        } else {
            warn!("delete for unknown record {} (user {})", id, user_id);
        }
        Ok(existed)
    }

    async fn list_activities(&self, user_id: &str) -> Result<Vec<Activity>> {
        let entries = self.connection.inner.entries.read().await;
        Ok(entries.get(user_id).cloned().unwrap_or_default())
    }

    async fn watch_activities(&self, user_id: &str) -> Result<broadcast::Receiver<Vec<Activity>>> {
        Ok(self.connection.inner.sender_for(user_id).await.subscribe())
    }
}
