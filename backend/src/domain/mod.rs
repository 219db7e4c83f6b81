//! # Domain Module
//!
//! Contains all business logic for the activity journal.
//!
//! This module encapsulates the rules that turn raw form input into
//! validated journal records, summarize a day's records for the
//! dashboard, and surface the journal to the parenting assistant. It
//! operates independently of any specific UI framework or storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **builders**: One builder per activity category, validation included
//! - **commands**: Form-shaped input structs the builders consume
//! - **activity_service**: Save/edit/delete orchestration over the store
//! - **summary**: Single-pass dashboard aggregation over a day's records
//! - **settings**: Tracked-activity filtering of timeline views
//! - **assistant**: Chat-context construction for the parenting assistant
//! - **timefmt**: Clock/duration formatting and future-time clamping
//!
//! ## Business Rules
//!
//! - A save is all-or-nothing: validation failures persist no records
//! - User-entered timestamps in the future are clamped to "now"
//! - Editing rebuilds the record set while preserving the edited id
//! - Optional fields are omitted from stored records, never null

pub mod activity_service;
pub mod assistant;
pub mod builders;
pub mod commands;
pub mod settings;
pub mod summary;
pub mod timefmt;

pub use activity_service::ActivityService;
pub use assistant::{AssistantClient, AssistantService, ChildProfile};
pub use summary::DashboardSummary;
