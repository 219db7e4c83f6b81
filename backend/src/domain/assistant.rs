//! # Assistant Service
//!
//! Builds the chat context handed to a parenting assistant: a system
//! prompt summarizing the child's recent journal (counts per category,
//! age, most recent nap) plus the running conversation. The actual model
//! call sits behind [`AssistantClient`] so tests can stub it out.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use shared::{Activity, ActivityKind, AssistantReply, ChatContext, ChatMessage, ChatRole};

use crate::error::JournalError;

/// How far back journal records feed into the prompt.
pub const CONTEXT_WINDOW_DAYS: i64 = 21;

/// The child the assistant is being asked about.
#[derive(Debug, Clone)]
pub struct ChildProfile {
    pub name: String,
    pub dob: Option<NaiveDate>,
}

impl ChildProfile {
    fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "your baby"
        } else {
            &self.name
        }
    }

    /// Whole months of age, or None when the date of birth is unknown.
    fn age_in_months(&self, now: DateTime<Utc>) -> Option<i64> {
        let dob = self.dob?;
        let days = (now.date_naive() - dob).num_days().max(0);
        Some((days as f64 / 30.5).floor() as i64)
    }
}

/// Upstream model integration. One call per user turn.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    async fn reply(&self, context: &ChatContext) -> Result<AssistantReply, JournalError>;
}

pub struct AssistantService {
    client: Box<dyn AssistantClient>,
}

impl AssistantService {
    pub fn new(client: Box<dyn AssistantClient>) -> Self {
        Self { client }
    }

    /// Summarize the recent journal into the assistant's system prompt.
    ///
    /// `recent` should already be limited to the caller's window (the
    /// last [`CONTEXT_WINDOW_DAYS`] days); records outside it are
    /// filtered here as well so stale input cannot skew the counts.
    pub fn build_chat_context(
        &self,
        profile: &ChildProfile,
        recent: &[Activity],
        now: DateTime<Utc>,
    ) -> ChatContext {
        let cutoff = now - chrono::Duration::days(CONTEXT_WINDOW_DAYS);
        let windowed: Vec<&Activity> = recent
            .iter()
            .filter(|a| match a.created_at() {
                Some(t) => t >= cutoff,
                None => false,
            })
            .collect();

        let count_of = |kind: ActivityKind| windowed.iter().filter(|a| a.kind() == kind).count();
        let sleep_count = count_of(ActivityKind::Sleep);
        let feeding_count = count_of(ActivityKind::Feeding);
        let diaper_count = count_of(ActivityKind::Diaper);

        let last_nap = windowed
            .iter()
            .filter(|a| a.kind() == ActivityKind::Sleep)
            .filter_map(|a| a.created_at())
            .max()
            .map(|t| t.format("%b %-d, %-I:%M %p").to_string())
            .unwrap_or_else(|| "N/A".to_string());

        let age = profile
            .age_in_months(now)
            .map(|m| m.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let content = format!(
            "You are a kind and practical assistant helping parents of young children.\n\
             \n\
             This baby is named {} and is {} months old.\n\
             In the last 3 weeks:\n\
             - {} sleep sessions were logged.\n\
             - {} feedings were recorded.\n\
             - {} diaper changes occurred.\n\
             The most recent nap began around {}.\n\
             \n\
             Respond with helpful insights based only on the above context. \
             Do not assume information you don't have.",
            profile.display_name(),
            age,
            sleep_count,
            feeding_count,
            diaper_count,
            last_nap,
        );

        ChatContext {
            system_message: ChatMessage {
                role: ChatRole::System,
                content,
            },
            history_messages: Vec::new(),
        }
    }

    /// Append the question to the context and ask the model.
    pub async fn ask(
        &self,
        mut context: ChatContext,
        question: &str,
    ) -> Result<AssistantReply, JournalError> {
        context.history_messages.push(ChatMessage {
            role: ChatRole::User,
            content: question.to_string(),
        });
        info!(
            "assistant exchange with {} history message(s)",
            context.history_messages.len()
        );
        self.client.reply(&context).await
    }
}
