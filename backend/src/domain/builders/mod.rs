//! # Entry Builders
//!
//! One builder per activity category. Each turns raw form input (a command
//! from [`crate::domain::commands::entries`]) into one or more validated
//! [`shared::Activity`] records.
//!
//! Builders are deterministic and side-effect-free: they never call the
//! store. A save either produces a fully valid set of records or nothing;
//! validation failures come back as a human-readable reason list.
//!
//! When more than one record is emitted for a single save (bottle feeding
//! with both breastmilk and formula, sleep with logged wake-ups), the
//! primary record is always first.
//!
//! User-entered timestamps later than `now` are clamped down to `now` so
//! future events can never be logged; the clamp applies uniformly across
//! the sleep, feeding, and diaper time fields.

pub mod diaper;
pub mod feeding;
pub mod health;
pub mod milestone;
pub mod sleep;

pub use diaper::DiaperBuilder;
pub use feeding::FeedingBuilder;
pub use health::HealthBuilder;
pub use milestone::MilestoneBuilder;
pub use sleep::SleepBuilder;

use chrono::{DateTime, Utc};
use shared::ActivityBase;

use crate::error::ValidationError;

/// Outcome of a builder's `validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ValidationReport {
    pub fn passed() -> Self {
        Self { ok: true, reasons: Vec::new() }
    }

    pub fn failed(reasons: Vec<String>) -> Self {
        Self { ok: false, reasons }
    }

    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Self::passed()
        } else {
            Self::failed(reasons)
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.ok {
            Ok(())
        } else {
            Err(ValidationError::new(self.reasons))
        }
    }
}

/// Pick the `created_at` for a rebuilt record: the original string is kept
/// verbatim when the logical timestamp is unchanged, so editing other
/// fields never perturbs ordering.
pub(crate) fn created_at_for(existing: Option<&ActivityBase>, instant: DateTime<Utc>) -> String {
    if let Some(prev) = existing {
        if let Ok(prev_instant) = DateTime::parse_from_rfc3339(&prev.created_at) {
            if prev_instant.with_timezone(&Utc) == instant {
                return prev.created_at.clone();
            }
        }
    }
    instant.to_rfc3339()
}

/// Trimmed notes, or None when the field was left blank.
pub(crate) fn clean_notes(notes: &Option<String>) -> Option<String> {
    notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
