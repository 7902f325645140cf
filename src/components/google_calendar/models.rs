use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status reported by the calendar provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Start or end of an event: either a timed instant or an all-day date.
/// Values are kept exactly as the provider sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    /// Display form used in listings: the date-time when present, else the date
    pub fn label(&self) -> String {
        self.date_time
            .as_ref()
            .or(self.date.as_ref())
            .cloned()
            .unwrap_or_default()
    }
}

/// Calendar event as returned by the events search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub status: EventStatus,
}

impl CalendarEvent {
    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }

    pub fn start_label(&self) -> String {
        self.start.as_ref().map(EventTime::label).unwrap_or_default()
    }

    pub fn summary_label(&self) -> &str {
        self.summary.as_deref().unwrap_or("(no title)")
    }
}

/// One page of the events search response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EventsPage {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

/// Calendar visible to the authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CalendarListEntry {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CalendarListPage {
    #[serde(default)]
    pub items: Vec<CalendarListEntry>,
}

/// Parameters of a single events search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub query: String,
    pub max_results: u32,
    pub calendar_id: String,
    pub time_min: DateTime<Utc>,
    pub expand_recurring: bool,
}
