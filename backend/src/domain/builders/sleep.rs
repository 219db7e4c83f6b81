//! Sleep entry builder.
//!
//! Emits the primary sleep record first, then one derived record per
//! logged wake-up. The primary carries the full interruption list; each
//! derived record marks the wake-up on the timeline at its own timestamp
//! without contributing to sleep-duration totals (its `duration` is unset).

use chrono::{DateTime, Utc};
use shared::{Activity, ActivityBase, ActivityKind, SleepActivity, SleepInterruption};

use crate::domain::commands::entries::SleepEntryCommand;
use crate::domain::timefmt::{clamp_to_now, format_clock, minutes_between};
use crate::error::ValidationError;

use super::{clean_notes, created_at_for, ValidationReport};

pub struct SleepBuilder;

impl SleepBuilder {
    pub fn validate(cmd: &SleepEntryCommand) -> ValidationReport {
        let mut reasons = Vec::new();

        if let Some(end) = cmd.end {
            if end < cmd.start {
                reasons.push("End time must not be before start time".to_string());
            }
        }
        if cmd.wakes.iter().any(|w| w.duration_minutes < 1) {
            reasons.push("Wake-ups need a duration of at least one minute".to_string());
        }

        ValidationReport::from_reasons(reasons)
    }

    /// Build the sleep record (and any derived wake records). The primary
    /// record is always first.
    pub fn build(
        cmd: &SleepEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ValidationError> {
        Self::validate(cmd).into_result()?;

        let start = clamp_to_now(cmd.start, now);
        let end = clamp_to_now(cmd.end.unwrap_or(cmd.start), now);
        let mins = minutes_between(start, end);

        let prev = match existing {
            Some(Activity::Sleep(prev)) => Some(prev),
            _ => None,
        };
        let id = prev
            .map(|p| p.base.id.clone())
            .unwrap_or_else(|| Activity::generate_id(ActivityKind::Sleep, start.timestamp_millis() as u64));

        let interruptions: Vec<SleepInterruption> = cmd
            .wakes
            .iter()
            .map(|w| SleepInterruption {
                time: clamp_to_now(w.time, now).to_rfc3339(),
                duration_minutes: w.duration_minutes,
            })
            .collect();

        let mut entries = vec![Activity::Sleep(SleepActivity {
            base: ActivityBase {
                id,
                user_id: None,
                date_key: None,
                title: format!(
                    "Sleep ({}): {}–{}",
                    cmd.period.label(),
                    format_clock(start),
                    format_clock(end)
                ),
                created_at: created_at_for(prev.map(|p| &p.base), start),
            },
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
            duration: Some(format!("{} min", mins)),
            period: cmd.period,
            mood: cmd.mood,
            notes: clean_notes(&cmd.notes),
            interruptions,
        })];

        for wake in &cmd.wakes {
            let time = clamp_to_now(wake.time, now);
            entries.push(Activity::Sleep(SleepActivity {
                base: ActivityBase {
                    id: Activity::generate_id(ActivityKind::Sleep, time.timestamp_millis() as u64),
                    user_id: None,
                    date_key: None,
                    title: format!("Wake: {} min", wake.duration_minutes),
                    created_at: time.to_rfc3339(),
                },
                start: time.to_rfc3339(),
                end: time.to_rfc3339(),
                duration: None,
                period: cmd.period,
                mood: None,
                notes: None,
                interruptions: Vec::new(),
            }));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::entries::WakeInput;
    use chrono::TimeZone;
    use shared::{SleepMood, SleepPeriod};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 19, h, m, 0).unwrap()
    }

    fn cmd(start: DateTime<Utc>, end: DateTime<Utc>) -> SleepEntryCommand {
        SleepEntryCommand {
            start,
            end: Some(end),
            period: SleepPeriod::Day,
            mood: None,
            notes: None,
            wakes: vec![],
        }
    }

    #[test]
    fn test_duration_is_rounded_minutes_between_start_and_end() {
        let now = at(12, 0);
        let entries = SleepBuilder::build(&cmd(at(9, 0), at(9, 30)), None, now).unwrap();
        assert_eq!(entries.len(), 1);
        match &entries[0] {
            Activity::Sleep(s) => {
                assert_eq!(s.duration.as_deref(), Some("30 min"));
                assert_eq!(s.period, SleepPeriod::Day);
                assert_eq!(s.base.title, "Sleep (Day): 9:00 AM–9:30 AM");
            }
            other => panic!("expected sleep record, got {:?}", other),
        }
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let now = at(12, 0);
        let err = SleepBuilder::build(&cmd(at(10, 0), at(9, 0)), None, now).unwrap_err();
        assert_eq!(err.reasons, vec!["End time must not be before start time".to_string()]);
    }

    #[test]
    fn test_future_times_are_clamped_to_now() {
        let now = at(12, 0);
        let entries = SleepBuilder::build(&cmd(at(11, 50), at(13, 0)), None, now).unwrap();
        match &entries[0] {
            Activity::Sleep(s) => {
                assert_eq!(s.end, now.to_rfc3339());
                assert_eq!(s.duration.as_deref(), Some("10 min"));
            }
            other => panic!("expected sleep record, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_end_defaults_to_start() {
        let now = at(12, 0);
        let command = SleepEntryCommand { end: None, ..cmd(at(9, 0), at(9, 0)) };
        let entries = SleepBuilder::build(&command, None, now).unwrap();
        match &entries[0] {
            Activity::Sleep(s) => assert_eq!(s.duration.as_deref(), Some("0 min")),
            other => panic!("expected sleep record, got {:?}", other),
        }
    }

    #[test]
    fn test_wakes_emit_derived_records_after_the_primary() {
        let now = at(12, 0);
        let mut command = cmd(at(1, 0), at(7, 0));
        command.period = SleepPeriod::Night;
        command.wakes = vec![
            WakeInput { time: at(3, 0), duration_minutes: 5 },
            WakeInput { time: at(5, 30), duration_minutes: 10 },
        ];

        let entries = SleepBuilder::build(&command, None, now).unwrap();
        assert_eq!(entries.len(), 3);

        match &entries[0] {
            Activity::Sleep(primary) => {
                assert_eq!(primary.interruptions.len(), 2);
                assert_eq!(primary.interruptions[0].duration_minutes, 5);
                assert_eq!(primary.interruptions[1].time, at(5, 30).to_rfc3339());
            }
            other => panic!("expected sleep record, got {:?}", other),
        }
        match &entries[1] {
            Activity::Sleep(wake) => {
                assert_eq!(wake.base.title, "Wake: 5 min");
                assert_eq!(wake.duration, None);
                assert_eq!(wake.period, SleepPeriod::Night);
            }
            other => panic!("expected sleep record, got {:?}", other),
        }

        let mut ids: Vec<&str> = entries.iter().map(|e| e.base().id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3, "every derived record needs its own id");
    }

    #[test]
    fn test_editing_preserves_id_and_created_at() {
        let now = at(12, 0);
        let first = SleepBuilder::build(&cmd(at(9, 0), at(9, 30)), None, now).unwrap();
        let produced = first[0].clone();

        let mut edit = cmd(at(9, 0), at(9, 45));
        edit.mood = Some(SleepMood::Happy);
        let rebuilt = SleepBuilder::build(&edit, Some(&produced), now).unwrap();

        assert_eq!(rebuilt[0].base().id, produced.base().id);
        assert_eq!(rebuilt[0].base().created_at, produced.base().created_at);
        match &rebuilt[0] {
            Activity::Sleep(s) => assert_eq!(s.duration.as_deref(), Some("45 min")),
            other => panic!("expected sleep record, got {:?}", other),
        }
    }

    #[test]
    fn test_editing_the_time_updates_created_at() {
        let now = at(12, 0);
        let first = SleepBuilder::build(&cmd(at(9, 0), at(9, 30)), None, now).unwrap();
        let produced = first[0].clone();

        let rebuilt = SleepBuilder::build(&cmd(at(10, 0), at(10, 30)), Some(&produced), now).unwrap();
        assert_eq!(rebuilt[0].base().id, produced.base().id);
        assert_eq!(rebuilt[0].base().created_at, at(10, 0).to_rfc3339());
    }
}
