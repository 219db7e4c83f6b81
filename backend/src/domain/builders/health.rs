//! Health entry builder. The lightest category: a title and optional
//! free-text details.

use chrono::{DateTime, Utc};
use shared::{Activity, ActivityBase, ActivityKind, HealthActivity};

use crate::domain::commands::entries::HealthEntryCommand;
use crate::error::ValidationError;

use super::{created_at_for, ValidationReport};

pub struct HealthBuilder;

impl HealthBuilder {
    pub fn validate(_cmd: &HealthEntryCommand) -> ValidationReport {
        ValidationReport::passed()
    }

    pub fn build(
        cmd: &HealthEntryCommand,
        existing: Option<&Activity>,
        _now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ValidationError> {
        Self::validate(cmd).into_result()?;

        let prev = match existing {
            Some(Activity::Health(prev)) => Some(prev),
            _ => None,
        };
        let id = prev
            .map(|p| p.base.id.clone())
            .unwrap_or_else(|| Activity::generate_id(ActivityKind::Health, cmd.time.timestamp_millis() as u64));

        Ok(vec![Activity::Health(HealthActivity {
            base: ActivityBase {
                id,
                user_id: None,
                date_key: None,
                title: cmd.title.trim().to_string(),
                created_at: created_at_for(prev.map(|p| &p.base), cmd.time),
            },
            details: cmd.details.as_deref().map(str::trim).filter(|d| !d.is_empty()).map(str::to_string),
        })])
    }
}
