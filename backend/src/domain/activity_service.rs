//! # Activity Service
//!
//! Orchestrates the journal's save path: run the right builder over a
//! form command, stamp ownership and the grouping day onto each produced
//! record, then persist the set. Creating and editing share one path;
//! a record whose id matches the edited entry is updated in place and
//! every other record in the set is created fresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, info};
use shared::Activity;

use crate::domain::builders::{
    DiaperBuilder, FeedingBuilder, HealthBuilder, MilestoneBuilder, SleepBuilder,
};
use crate::domain::commands::entries::{
    DiaperEntryCommand, FeedingEntryCommand, HealthEntryCommand, MilestoneEntryCommand,
    SleepEntryCommand,
};
use crate::error::JournalError;
use crate::storage::traits::{ActivityStorage, Connection};

pub struct ActivityService<C: Connection> {
    activity_repository: C::ActivityRepository,
}

impl<C: Connection> ActivityService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            activity_repository: connection.create_activity_repository(),
        }
    }

    pub async fn log_sleep(
        &self,
        user_id: &str,
        cmd: &SleepEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, JournalError> {
        let entries = SleepBuilder::build(cmd, existing, now)?;
        self.persist(user_id, existing, entries).await
    }

    pub async fn log_feeding(
        &self,
        user_id: &str,
        cmd: &FeedingEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, JournalError> {
        let entries = FeedingBuilder::build(cmd, existing, now)?;
        self.persist(user_id, existing, entries).await
    }

    pub async fn log_diaper(
        &self,
        user_id: &str,
        cmd: &DiaperEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, JournalError> {
        let entries = DiaperBuilder::build(cmd, existing, now)?;
        self.persist(user_id, existing, entries).await
    }

    pub async fn log_milestone(
        &self,
        user_id: &str,
        cmd: &MilestoneEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, JournalError> {
        let entries = MilestoneBuilder::build(cmd, existing, now)?;
        self.persist(user_id, existing, entries).await
    }

    pub async fn log_health(
        &self,
        user_id: &str,
        cmd: &HealthEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, JournalError> {
        let entries = HealthBuilder::build(cmd, existing, now)?;
        self.persist(user_id, existing, entries).await
    }

    pub async fn delete_entry(&self, user_id: &str, id: &str) -> Result<bool, JournalError> {
        info!("deleting entry {} for user {}", id, user_id);
        self.activity_repository
            .delete_activity(user_id, id)
            .await
            .map_err(JournalError::Persistence)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Activity>, JournalError> {
        self.activity_repository
            .list_activities(user_id)
            .await
            .map_err(JournalError::Persistence)
    }

    /// Stamp ownership onto each built record and save the set. Concurrent
    /// saves of the same entry are last-write-wins; callers that need
    /// stricter behaviour serialize saves per entry id themselves.
    async fn persist(
        &self,
        user_id: &str,
        existing: Option<&Activity>,
        mut entries: Vec<Activity>,
    ) -> Result<Vec<Activity>, JournalError> {
        let existing_id = existing.map(|e| e.base().id.as_str());

        for entry in &mut entries {
            let base = entry.base_mut();
            base.user_id = Some(user_id.to_string());
            base.date_key = shared::date_key_from_timestamp(&base.created_at);
        }

        for entry in &entries {
            let id = entry.base().id.clone();
            let result = if existing_id == Some(id.as_str()) {
                self.activity_repository.update_activity(&id, entry).await
            } else {
                self.activity_repository.create_activity(entry).await.map(|_| ())
            };
            if let Err(e) = result {
                error!("failed to save entry {} for user {}: {}", id, user_id, e);
                return Err(JournalError::Persistence(e));
            }
        }

        info!("saved {} record(s) for user {}", entries.len(), user_id);
        Ok(entries)
    }
}
