//! # Hatchling Tracker Backend
//!
//! Core library for an infant activity journal: parents log sleep,
//! feeding, diaper, milestone, and health entries, see a daily summary,
//! and keep any number of views live-updated as the journal changes.
//!
//! The crate is layered the same way top to bottom:
//! - `domain`: builders, aggregation, and the save/edit orchestration
//! - `storage`: the store contract plus an in-memory reference backend
//! - `sync`: snapshot subscriptions with safe teardown
//! - `error`: the validation/persistence error taxonomy

pub mod domain;
pub mod error;
pub mod storage;
pub mod sync;

use std::sync::Arc;

use storage::memory::MemoryConnection;

/// Main backend struct that wires the services over one store.
pub struct Backend {
    pub activity_service: domain::ActivityService<MemoryConnection>,
    pub activity_feed: sync::ActivityFeed<MemoryConnection>,
    pub assistant_service: Option<domain::AssistantService>,
}

impl Backend {
    /// Create a backend over a fresh in-memory store.
    pub fn new() -> Self {
        let connection = Arc::new(MemoryConnection::new());

        Self {
            activity_service: domain::ActivityService::new(Arc::clone(&connection)),
            activity_feed: sync::ActivityFeed::new(connection),
            assistant_service: None,
        }
    }

    /// Attach an assistant integration. Without one the journal works
    /// normally and only the chat surface is unavailable.
    pub fn with_assistant(mut self, client: Box<dyn domain::AssistantClient>) -> Self {
        self.assistant_service = Some(domain::AssistantService::new(client));
        self
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::SleepPeriod;

    #[tokio::test]
    async fn test_backend_wires_service_and_feed_over_one_store() {
        let backend = Backend::new();
        let now = Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).unwrap();

        let cmd = domain::commands::entries::SleepEntryCommand {
            start: Utc.with_ymd_and_hms(2025, 6, 19, 9, 0, 0).unwrap(),
            end: Some(Utc.with_ymd_and_hms(2025, 6, 19, 9, 30, 0).unwrap()),
            period: SleepPeriod::Day,
            mood: None,
            notes: None,
            wakes: Vec::new(),
        };
        backend
            .activity_service
            .log_sleep("u1", &cmd, None, now)
            .await
            .unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = backend
            .activity_feed
            .subscribe("u1", move |snapshot| {
                let _ = tx.send(snapshot.len());
            })
            .await
            .unwrap();

        assert_eq!(rx.recv().await, Some(1));
    }
}
