//! Diaper entry builder.
//!
//! `diarrhea` is only meaningful for a Dirty diaper: rebuilding with any
//! other status drops the flag entirely. `rash` is orthogonal to status
//! and survives status changes.

use chrono::{DateTime, Utc};
use shared::{Activity, ActivityBase, ActivityKind, DiaperActivity, DiaperStatus};

use crate::domain::commands::entries::DiaperEntryCommand;
use crate::domain::timefmt::clamp_to_now;
use crate::error::ValidationError;

use super::{clean_notes, created_at_for, ValidationReport};

pub struct DiaperBuilder;

impl DiaperBuilder {
    pub fn validate(cmd: &DiaperEntryCommand) -> ValidationReport {
        if cmd.status.is_none() {
            ValidationReport::failed(vec!["Select a diaper status".to_string()])
        } else {
            ValidationReport::passed()
        }
    }

    pub fn build(
        cmd: &DiaperEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ValidationError> {
        Self::validate(cmd).into_result()?;

        let time = clamp_to_now(cmd.time, now);
        let Some(status) = cmd.status else {
            return Err(ValidationError::new(vec!["Select a diaper status".to_string()]));
        };
        let diarrhea = status == DiaperStatus::Dirty && cmd.diarrhea;

        let prev = match existing {
            Some(Activity::Diaper(prev)) => Some(prev),
            _ => None,
        };
        let id = prev
            .map(|p| p.base.id.clone())
            .unwrap_or_else(|| Activity::generate_id(ActivityKind::Diaper, time.timestamp_millis() as u64));

        let title = if diarrhea {
            format!("Diaper: {} (diarrhea)", status.label())
        } else {
            format!("Diaper: {}", status.label())
        };

        Ok(vec![Activity::Diaper(DiaperActivity {
            base: ActivityBase {
                id,
                user_id: None,
                date_key: None,
                title,
                created_at: created_at_for(prev.map(|p| &p.base), time),
            },
            status: Some(status),
            rash: cmd.rash.then_some(true),
            diarrhea: diarrhea.then_some(true),
            notes: clean_notes(&cmd.notes),
        })])
    }
}
