//! Milestone entry builder. A blank title falls back to "Milestone".

use chrono::{DateTime, Utc};
use shared::{Activity, ActivityBase, ActivityKind, MilestoneActivity};

use crate::domain::commands::entries::MilestoneEntryCommand;
use crate::error::ValidationError;

use super::{clean_notes, created_at_for, ValidationReport};

pub struct MilestoneBuilder;

impl MilestoneBuilder {
    /// Milestones have no mandatory fields beyond the title default.
    pub fn validate(_cmd: &MilestoneEntryCommand) -> ValidationReport {
        ValidationReport::passed()
    }

    pub fn build(
        cmd: &MilestoneEntryCommand,
        existing: Option<&Activity>,
        _now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ValidationError> {
        Self::validate(cmd).into_result()?;

        let prev = match existing {
            Some(Activity::Milestone(prev)) => Some(prev),
            _ => None,
        };
        let id = prev
            .map(|p| p.base.id.clone())
            .unwrap_or_else(|| Activity::generate_id(ActivityKind::Milestone, cmd.date.timestamp_millis() as u64));

        let title = {
            let trimmed = cmd.title.trim();
            if trimmed.is_empty() {
                "Milestone".to_string()
            } else {
                trimmed.to_string()
            }
        };

        Ok(vec![Activity::Milestone(MilestoneActivity {
            base: ActivityBase {
                id,
                user_id: None,
                date_key: None,
                title,
                created_at: created_at_for(prev.map(|p| &p.base), cmd.date),
            },
            notes: clean_notes(&cmd.notes),
            photos: cmd.photos.clone(),
        })])
    }
}
