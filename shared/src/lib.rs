use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five activity categories the journal can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Sleep,
    Feeding,
    Diaper,
    Milestone,
    Health,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Sleep => "sleep",
            ActivityKind::Feeding => "feeding",
            ActivityKind::Diaper => "diaper",
            ActivityKind::Milestone => "milestone",
            ActivityKind::Health => "health",
        }
    }

    pub fn parse(s: &str) -> Option<ActivityKind> {
        match s {
            "sleep" => Some(ActivityKind::Sleep),
            "feeding" => Some(ActivityKind::Feeding),
            "diaper" => Some(ActivityKind::Diaper),
            "milestone" => Some(ActivityKind::Milestone),
            "health" => Some(ActivityKind::Health),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields shared by every activity record.
///
/// `user_id` and `date_key` are assigned by the persistence layer just before
/// a record is written; builders leave them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBase {
    /// Record ID in format: "entry::<kind>::<epoch_millis>::<hex_suffix>"
    pub id: String,
    /// ID of the account that owns this record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Calendar-day bucket (YYYY-MM-DD) derived from `created_at`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_key: Option<String>,
    /// Human-readable summary derived by the entry builder
    pub title: String,
    /// RFC 3339 timestamp; the authoritative ordering key
    pub created_at: String,
}

/// Whether a sleep session happened during the day or at night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepPeriod {
    Day,
    Night,
}

impl SleepPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            SleepPeriod::Day => "Day",
            SleepPeriod::Night => "Night",
        }
    }
}

/// Mood on waking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepMood {
    Happy,
    Fussy,
}

/// One logged wake-up within a sleep session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepInterruption {
    /// RFC 3339 timestamp of the wake-up
    pub time: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepActivity {
    #[serde(flatten)]
    pub base: ActivityBase,
    /// RFC 3339 session start
    pub start: String,
    /// RFC 3339 session end; never earlier than `start`
    pub end: String,
    /// Derived minutes string, e.g. "30 min"; absent on derived wake records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub period: SleepPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<SleepMood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interruptions: Vec<SleepInterruption>,
}

/// Which breast the session favoured (the side with more recorded minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreastSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreastFeeding {
    #[serde(flatten)]
    pub base: ActivityBase,
    pub start: String,
    pub end: String,
    pub side: BreastSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleFeeding {
    #[serde(flatten)]
    pub base: ActivityBase,
    /// Always positive; validated at build time
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidsReaction {
    Liked,
    Loved,
    Disliked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidsFeeding {
    #[serde(flatten)]
    pub base: ActivityBase,
    pub reaction: SolidsReaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Feeding records are further discriminated by `mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FeedingActivity {
    Breast(BreastFeeding),
    Bottle(BottleFeeding),
    Solids(SolidsFeeding),
}

impl FeedingActivity {
    pub fn base(&self) -> &ActivityBase {
        match self {
            FeedingActivity::Breast(f) => &f.base,
            FeedingActivity::Bottle(f) => &f.base,
            FeedingActivity::Solids(f) => &f.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ActivityBase {
        match self {
            FeedingActivity::Breast(f) => &mut f.base,
            FeedingActivity::Bottle(f) => &mut f.base,
            FeedingActivity::Solids(f) => &mut f.base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperStatus {
    Wet,
    Dry,
    Dirty,
}

impl DiaperStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DiaperStatus::Wet => "wet",
            DiaperStatus::Dry => "dry",
            DiaperStatus::Dirty => "dirty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaperActivity {
    #[serde(flatten)]
    pub base: ActivityBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DiaperStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rash: Option<bool>,
    /// Only meaningful while `status` is Dirty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diarrhea: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneActivity {
    #[serde(flatten)]
    pub base: ActivityBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthActivity {
    #[serde(flatten)]
    pub base: ActivityBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// One logged event in the journal, discriminated by `type`.
///
/// Optional fields are omitted from the serialized form entirely (never
/// written as null) because the store layer requires compact records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Sleep(SleepActivity),
    Feeding(FeedingActivity),
    Diaper(DiaperActivity),
    Milestone(MilestoneActivity),
    Health(HealthActivity),
}

impl Activity {
    pub fn base(&self) -> &ActivityBase {
        match self {
            Activity::Sleep(a) => &a.base,
            Activity::Feeding(a) => a.base(),
            Activity::Diaper(a) => &a.base,
            Activity::Milestone(a) => &a.base,
            Activity::Health(a) => &a.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ActivityBase {
        match self {
            Activity::Sleep(a) => &mut a.base,
            Activity::Feeding(a) => a.base_mut(),
            Activity::Diaper(a) => &mut a.base,
            Activity::Milestone(a) => &mut a.base,
            Activity::Health(a) => &mut a.base,
        }
    }

    /// Which of the five categories this record belongs to.
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::Sleep(_) => ActivityKind::Sleep,
            Activity::Feeding(_) => ActivityKind::Feeding,
            Activity::Diaper(_) => ActivityKind::Diaper,
            Activity::Milestone(_) => ActivityKind::Milestone,
            Activity::Health(_) => ActivityKind::Health,
        }
    }

    /// True when `created_at` truncated to its date component equals `date_key`.
    pub fn belongs_to_day(&self, date_key: &str) -> bool {
        match date_key_from_timestamp(&self.base().created_at) {
            Some(key) => key == date_key,
            None => false,
        }
    }

    /// Parsed `created_at`, or None when the stored timestamp is malformed.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.base().created_at).ok()
    }

    /// Generate a unique record ID.
    /// Format: entry::<kind>::<epoch_millis>::<hex_suffix>
    /// Example: entry::sleep::1702516122000::a1b2c3d4
    ///
    /// The random suffix keeps derived records that share one logical
    /// timestamp from colliding.
    pub fn generate_id(kind: ActivityKind, epoch_millis: u64) -> String {
        let suffix: String = uuid::Uuid::new_v4().simple().to_string().chars().take(8).collect();
        format!("entry::{}::{}::{}", kind, epoch_millis, suffix)
    }

    /// Parse a record ID to extract its kind and timestamp.
    pub fn parse_id(id: &str) -> Result<(ActivityKind, u64), ActivityIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 4 || parts[0] != "entry" {
            return Err(ActivityIdError::InvalidFormat);
        }

        let kind = ActivityKind::parse(parts[1]).ok_or(ActivityIdError::InvalidKind)?;

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| ActivityIdError::InvalidTimestamp)?;

        Ok((kind, epoch_millis))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityIdError {
    InvalidFormat,
    InvalidKind,
    InvalidTimestamp,
}

impl fmt::Display for ActivityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityIdError::InvalidFormat => write!(f, "Invalid activity ID format"),
            ActivityIdError::InvalidKind => write!(f, "Invalid activity kind"),
            ActivityIdError::InvalidTimestamp => write!(f, "Invalid timestamp in activity ID"),
        }
    }
}

impl std::error::Error for ActivityIdError {}

/// Derive the YYYY-MM-DD day bucket from an RFC 3339 timestamp.
/// Returns None for malformed input rather than guessing.
pub fn date_key_from_timestamp(iso: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(iso).ok()?;
    Some(iso.chars().take(10).collect())
}

/// Which activity categories the user has enabled for tracking.
/// Used only to filter what display consumers see; the aggregator
/// never reads this map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedActivities {
    pub sleep: bool,
    pub feeding: bool,
    pub diaper: bool,
    pub milestone: bool,
    pub health: bool,
}

impl Default for TrackedActivities {
    fn default() -> Self {
        Self {
            sleep: true,
            feeding: true,
            diaper: true,
            milestone: true,
            health: true,
        }
    }
}

impl TrackedActivities {
    pub fn is_enabled(&self, kind: ActivityKind) -> bool {
        match kind {
            ActivityKind::Sleep => self.sleep,
            ActivityKind::Feeding => self.feeding,
            ActivityKind::Diaper => self.diaper,
            ActivityKind::Milestone => self.milestone,
            ActivityKind::Health => self.health,
        }
    }
}

/// The slice of user settings this core consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub child_first_name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub child_dob: String,
    pub tracked_activities: TrackedActivities,
    pub feeding_unit: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            child_first_name: String::new(),
            child_dob: String::new(),
            tracked_activities: TrackedActivities::default(),
            feeding_unit: "oz".to_string(),
        }
    }
}

/// Role of a chat message in the assistant conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// System prompt plus conversation history handed to the assistant service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub system_message: ChatMessage,
    pub history_messages: Vec<ChatMessage>,
}

/// What the assistant collaborator returns for one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub success: bool,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
