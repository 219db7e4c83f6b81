//! Shared state behind the in-memory backend.

use std::collections::HashMap;
use std::sync::Arc;

use shared::Activity;
use tokio::sync::{broadcast, RwLock};

use crate::storage::traits::Connection;

use super::ActivityRepository;

/// How many snapshots a slow subscriber may fall behind before it starts
/// seeing lag errors.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

#[derive(Default)]
pub(crate) struct StoreInner {
    /// Records per user, kept ordered by `created_at` descending.
    pub(crate) entries: RwLock<HashMap<String, Vec<Activity>>>,
    /// One snapshot channel per user, created lazily on first watch/write.
    pub(crate) channels: RwLock<HashMap<String, broadcast::Sender<Vec<Activity>>>>,
}

impl StoreInner {
    pub(crate) async fn sender_for(&self, user_id: &str) -> broadcast::Sender<Vec<Activity>> {
        let mut channels = self.channels.write().await;
        channels
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY).0)
            .clone()
    }
}

/// Handle to one in-memory store. Cloning is cheap and every clone sees
/// the same data.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    pub(crate) inner: Arc<StoreInner>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for MemoryConnection {
    type ActivityRepository = ActivityRepository;

    fn create_activity_repository(&self) -> ActivityRepository {
        ActivityRepository::new(self.clone())
    }
}
