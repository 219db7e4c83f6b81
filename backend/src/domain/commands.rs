//! Domain-level command types.
//!
//! These structs carry raw user input from the (out-of-scope) form layer
//! into the entry builders. They are internal to the domain; the display
//! layer maps its own state into these before asking a builder to
//! validate and construct records.

pub mod entries {
    use chrono::{DateTime, Utc};
    use shared::{DiaperStatus, SleepMood, SleepPeriod};

    /// One logged wake-up inside a sleep session form.
    #[derive(Debug, Clone, PartialEq)]
    pub struct WakeInput {
        pub time: DateTime<Utc>,
        pub duration_minutes: i64,
    }

    /// Input for logging or editing a sleep session.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SleepEntryCommand {
        pub start: DateTime<Utc>,
        /// Defaults to `start` when the user never picked an end time.
        pub end: Option<DateTime<Utc>>,
        pub period: SleepPeriod,
        pub mood: Option<SleepMood>,
        pub notes: Option<String>,
        pub wakes: Vec<WakeInput>,
    }

    /// Breast section of the feeding form.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BreastInput {
        pub left_minutes: i64,
        pub right_minutes: i64,
    }

    /// Bottle section of the feeding form. Each positive amount becomes
    /// its own bottle record.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BottleInput {
        pub breast_milk_oz: f64,
        pub formula_oz: f64,
    }

    /// One food row in the solids section.
    #[derive(Debug, Clone, PartialEq)]
    pub struct FoodItem {
        pub name: String,
        pub liked: bool,
    }

    /// Solids section of the feeding form.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct SolidsInput {
        pub foods: Vec<FoodItem>,
    }

    /// Input for logging or editing a feeding session. A section being
    /// present means the user selected that mode; a single save can emit
    /// one record per selected mode (and two for a bottle section with
    /// both amounts).
    #[derive(Debug, Clone, PartialEq)]
    pub struct FeedingEntryCommand {
        pub time: DateTime<Utc>,
        pub breast: Option<BreastInput>,
        pub bottle: Option<BottleInput>,
        pub solids: Option<SolidsInput>,
        /// Unit for bottle amounts; "oz" when unset.
        pub unit: Option<String>,
        pub notes: Option<String>,
    }

    /// Input for logging or editing a diaper change.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DiaperEntryCommand {
        pub time: DateTime<Utc>,
        pub status: Option<DiaperStatus>,
        pub rash: bool,
        pub diarrhea: bool,
        pub notes: Option<String>,
    }

    /// Input for logging or editing a milestone.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MilestoneEntryCommand {
        pub date: DateTime<Utc>,
        pub title: String,
        pub notes: Option<String>,
        pub photos: Vec<String>,
    }

    /// Input for logging a health event.
    #[derive(Debug, Clone, PartialEq)]
    pub struct HealthEntryCommand {
        pub time: DateTime<Utc>,
        pub title: String,
        pub details: Option<String>,
    }
}
