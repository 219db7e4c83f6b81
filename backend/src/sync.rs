//! # Live Collection Sync
//!
//! Subscribes to the store for all of a user's activities and delivers
//! ordered snapshots to a consumer callback on every change. One feed
//! backs one consuming view; re-subscribing (the view regained focus)
//! supersedes the previous subscription.
//!
//! Teardown races are handled with a generation counter: each subscribe
//! bumps the feed's generation and captures it in the handle, and a
//! snapshot is only delivered while the captured generation is still
//! current. A snapshot that arrives after the view tore down, or after a
//! newer subscribe, is discarded instead of being applied to stale
//! state. Unsubscribing is idempotent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{info, warn};
use shared::Activity;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::error::JournalError;
use crate::storage::traits::{ActivityStorage, Connection};

/// Live feed of one user's activity snapshots.
pub struct ActivityFeed<C: Connection> {
    repository: C::ActivityRepository,
    generation: Arc<AtomicU64>,
}

impl<C: Connection> ActivityFeed<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            repository: connection.create_activity_repository(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to snapshot pushes for `user_id`. The current snapshot
    /// is delivered immediately, then one per store mutation, always in
    /// `created_at` descending order as the store provides it.
    ///
    /// Any previous subscription on this feed becomes stale: its pending
    /// snapshots are discarded, not applied.
    pub async fn subscribe<F>(
        &self,
        user_id: &str,
        on_snapshot: F,
    ) -> Result<Subscription, JournalError>
    where
        F: Fn(Vec<Activity>) + Send + Sync + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);

        let mut receiver = self
            .repository
            .watch_activities(user_id)
            .await
            .map_err(|e| JournalError::Sync(e.to_string()))?;
        let initial = self
            .repository
            .list_activities(user_id)
            .await
            .map_err(|e| JournalError::Sync(e.to_string()))?;

        info!("subscribed to activities for user {} (generation {})", user_id, generation);

        let guard = Arc::clone(&current);
        let user = user_id.to_string();
        let task = tokio::spawn(async move {
            let deliver = |snapshot: Vec<Activity>| {
                if guard.load(Ordering::SeqCst) == generation {
                    on_snapshot(snapshot);
                    true
                } else {
                    false
                }
            };

            if !deliver(initial) {
                return;
            }

            loop {
                match receiver.recv().await {
                    Ok(snapshot) => {
                        if !deliver(snapshot) {
                            // superseded or torn down; stop quietly
                            return;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        // only full snapshots flow here, so the next one
                        // catches us up
                        warn!("live feed for user {} lagged by {} snapshots", user, missed);
                    }
                    Err(RecvError::Closed) => {
                        warn!("live feed for user {} closed; keeping last snapshot", user);
                        return;
                    }
                }
            }
        });

        Ok(Subscription { generation, current, task })
    }
}

/// Cancellable handle for one subscription.
pub struct Subscription {
    generation: u64,
    current: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Whether this subscription is still the feed's current one.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// Tear down the subscription. Safe to call more than once, and a
    /// no-op if a newer subscription already superseded this one.
    pub fn unsubscribe(&self) {
        let _ = self.current.compare_exchange(
            self.generation,
            self.generation + 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.task.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryConnection;
    use crate::storage::traits::ActivityStorage;
    use shared::{ActivityBase, ActivityKind, HealthActivity};
    use std::sync::Mutex;
    use std::time::Duration;

    fn record(id_millis: u64, created_at: &str) -> Activity {
        Activity::Health(HealthActivity {
            base: ActivityBase {
                id: Activity::generate_id(ActivityKind::Health, id_millis),
                user_id: Some("u1".to_string()),
                date_key: shared::date_key_from_timestamp(created_at),
                title: "Checkup".to_string(),
                created_at: created_at.to_string(),
            },
            details: None,
        })
    }

    fn collector() -> (Arc<Mutex<Vec<usize>>>, impl Fn(Vec<Activity>) + Send + Sync + 'static) {
        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |snapshot: Vec<Activity>| {
            sink.lock().unwrap().push(snapshot.len());
        })
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_initial_snapshot_is_delivered_immediately() {
        let connection = Arc::new(MemoryConnection::new());
        let repo = connection.create_activity_repository();
        repo.create_activity(&record(1, "2025-06-19T08:00:00+00:00")).await.unwrap();

        let feed = ActivityFeed::new(Arc::clone(&connection));
        let (seen, sink) = collector();
        let _sub = feed.subscribe("u1", sink).await.unwrap();
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_every_mutation_triggers_a_snapshot() {
        let connection = Arc::new(MemoryConnection::new());
        let repo = connection.create_activity_repository();

        let feed = ActivityFeed::new(Arc::clone(&connection));
        let (seen, sink) = collector();
        let _sub = feed.subscribe("u1", sink).await.unwrap();
        settle().await;

        repo.create_activity(&record(1, "2025-06-19T08:00:00+00:00")).await.unwrap();
        repo.create_activity(&record(2, "2025-06-19T09:00:00+00:00")).await.unwrap();
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_snapshots_after_unsubscribe_are_discarded() {
        let connection = Arc::new(MemoryConnection::new());
        let repo = connection.create_activity_repository();

        let feed = ActivityFeed::new(Arc::clone(&connection));
        let (seen, sink) = collector();
        let sub = feed.subscribe("u1", sink).await.unwrap();
        settle().await;

        sub.unsubscribe();
        repo.create_activity(&record(1, "2025-06-19T08:00:00+00:00")).await.unwrap();
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![0], "stale snapshot must not be applied");
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let connection = Arc::new(MemoryConnection::new());
        let feed = ActivityFeed::new(Arc::clone(&connection));
        let (_seen, sink) = collector();
        let sub = feed.subscribe("u1", sink).await.unwrap();

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_current());
    }

    #[tokio::test]
    async fn test_resubscribe_supersedes_the_previous_subscription() {
        let connection = Arc::new(MemoryConnection::new());
        let repo = connection.create_activity_repository();

        let feed = ActivityFeed::new(Arc::clone(&connection));
        let (first_seen, first_sink) = collector();
        let first = feed.subscribe("u1", first_sink).await.unwrap();
        settle().await;

        let (second_seen, second_sink) = collector();
        let _second = feed.subscribe("u1", second_sink).await.unwrap();
        settle().await;
        assert!(!first.is_current());

        repo.create_activity(&record(1, "2025-06-19T08:00:00+00:00")).await.unwrap();
        settle().await;

        assert_eq!(*first_seen.lock().unwrap(), vec![0], "superseded feed stays frozen");
        assert_eq!(*second_seen.lock().unwrap(), vec![0, 1]);
    }
}
