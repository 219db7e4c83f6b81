//! Dashboard summary aggregator.
//!
//! A pure reduction over an activity collection as of a reference instant.
//! Single pass, order-independent (sums and a max), and total: a record
//! with a malformed or missing timestamp is excluded from time-based
//! reductions instead of failing the whole computation. Given the same
//! `(collection, now)` the output is identical, so callers are free to
//! recompute on every live-sync tick.
//!
//! The aggregator trusts its input set: day scoping and category
//! filtering happen upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Activity, DiaperStatus, FeedingActivity, SleepPeriod};

use crate::domain::timefmt::format_minutes;

/// Feeding totals split by mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingTotals {
    pub bottle_oz: f64,
    pub breast_minutes: i64,
}

/// Wet/dirty diaper counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperCounts {
    pub wet: usize,
    pub dirty: usize,
}

/// The metrics the dashboard cards render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_day_sleep_minutes: i64,
    /// "<h>h <m>m" / "<m>m", or "–" when no sleep was ever logged
    pub time_since_last_sleep: String,
    pub feeding_totals: FeedingTotals,
    pub diaper_counts: DiaperCounts,
}

impl DashboardSummary {
    pub fn empty() -> Self {
        Self {
            total_day_sleep_minutes: 0,
            time_since_last_sleep: "–".to_string(),
            feeding_totals: FeedingTotals { bottle_oz: 0.0, breast_minutes: 0 },
            diaper_counts: DiaperCounts { wet: 0, dirty: 0 },
        }
    }

    /// Day-sleep total formatted for the sleep card, e.g. "1h 0m".
    pub fn formatted_day_sleep(&self) -> String {
        format_minutes(self.total_day_sleep_minutes)
    }
}

/// Reduce an activity collection into dashboard metrics as of `now`.
pub fn compute(activities: &[Activity], now: DateTime<Utc>) -> DashboardSummary {
    let mut summary = DashboardSummary::empty();
    let mut last_sleep: Option<DateTime<Utc>> = None;

    for activity in activities {
        match activity {
            Activity::Sleep(sleep) => {
                if sleep.period == SleepPeriod::Day {
                    if let Some(mins) = parse_duration_minutes(sleep.duration.as_deref()) {
                        summary.total_day_sleep_minutes += mins;
                    }
                }
                if let Some(at) = activity.created_at() {
                    let at = at.with_timezone(&Utc);
                    last_sleep = Some(match last_sleep {
                        Some(prev) if prev >= at => prev,
                        _ => at,
                    });
                }
            }
            Activity::Feeding(FeedingActivity::Bottle(bottle)) => {
                summary.feeding_totals.bottle_oz += bottle.amount;
            }
            Activity::Feeding(FeedingActivity::Breast(breast)) => {
                if let (Ok(start), Ok(end)) = (
                    DateTime::parse_from_rfc3339(&breast.start),
                    DateTime::parse_from_rfc3339(&breast.end),
                ) {
                    let mins = ((end - start).num_milliseconds() as f64 / 60_000.0).round() as i64;
                    summary.feeding_totals.breast_minutes += mins;
                }
            }
            Activity::Feeding(FeedingActivity::Solids(_)) => {}
            Activity::Diaper(diaper) => match diaper.status {
                Some(DiaperStatus::Wet) => summary.diaper_counts.wet += 1,
                Some(DiaperStatus::Dirty) => summary.diaper_counts.dirty += 1,
                _ => {}
            },
            Activity::Milestone(_) | Activity::Health(_) => {}
        }
    }

    if let Some(last) = last_sleep {
        let mins = ((now - last).num_milliseconds() as f64 / 60_000.0).round() as i64;
        summary.time_since_last_sleep = format_minutes(mins.max(0));
    }

    summary
}

/// Parse the leading integer out of a derived duration string ("30 min").
fn parse_duration_minutes(duration: Option<&str>) -> Option<i64> {
    duration?.split_whitespace().next()?.parse().ok()
}
