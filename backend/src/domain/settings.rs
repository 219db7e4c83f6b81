//! Tracked-activity filtering.
//!
//! Applied downstream of the raw snapshot, before data reaches display
//! consumers. The aggregator never sees the tracked-activities map; if a
//! category is disabled the caller filters first and hands the aggregator
//! the reduced set.

use shared::{Activity, TrackedActivities};

/// Return only the activities whose category is enabled. The snapshot
/// itself is never mutated.
pub fn filter_enabled(snapshot: &[Activity], tracked: &TrackedActivities) -> Vec<Activity> {
    snapshot
        .iter()
        .filter(|a| tracked.is_enabled(a.kind()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ActivityBase, ActivityKind, DiaperActivity, HealthActivity};

    fn diaper() -> Activity {
        Activity::Diaper(DiaperActivity {
            base: ActivityBase {
                id: Activity::generate_id(ActivityKind::Diaper, 1),
                user_id: None,
                date_key: None,
                title: "Diaper: wet".to_string(),
                created_at: "2025-06-19T08:00:00+00:00".to_string(),
            },
            status: None,
            rash: None,
            diarrhea: None,
            notes: None,
        })
    }

    fn health() -> Activity {
        Activity::Health(HealthActivity {
            base: ActivityBase {
                id: Activity::generate_id(ActivityKind::Health, 2),
                user_id: None,
                date_key: None,
                title: "Checkup".to_string(),
                created_at: "2025-06-19T09:00:00+00:00".to_string(),
            },
            details: None,
        })
    }

    #[test]
    fn test_disabled_categories_are_filtered_out() {
        let snapshot = vec![diaper(), health()];
        let tracked = TrackedActivities { diaper: false, ..TrackedActivities::default() };

        let visible = filter_enabled(&snapshot, &tracked);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind(), ActivityKind::Health);
        // the raw snapshot is untouched
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_default_settings_keep_everything() {
        let snapshot = vec![diaper(), health()];
        let visible = filter_enabled(&snapshot, &TrackedActivities::default());
        assert_eq!(visible, snapshot);
    }
}
