#![allow(dead_code)]

use async_trait::async_trait;
use remove_meetings::components::console::Console;
use remove_meetings::components::google_calendar::models::{
    CalendarEvent, CalendarListEntry, EventQuery, EventStatus, EventTime,
};
use remove_meetings::components::google_calendar::CalendarApi;
use remove_meetings::error::{console_error, google_calendar_error, AppResult};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// Build an event with a timed start
pub fn event(id: &str, summary: &str, status: EventStatus) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        summary: Some(summary.to_string()),
        start: Some(EventTime {
            date_time: Some("2026-10-20T09:30:00+02:00".to_string()),
            ..Default::default()
        }),
        status,
        ..Default::default()
    }
}

/// In-memory calendar that records every call
#[derive(Default)]
pub struct MockCalendarApi {
    pub events: Vec<CalendarEvent>,
    pub calendars: Vec<CalendarListEntry>,
    pub fail_search: bool,
    pub failing_ids: HashSet<String>,
    pub searches: Mutex<Vec<EventQuery>>,
    pub deletes: Mutex<Vec<String>>,
}

impl MockCalendarApi {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        let mut ids = self.deletes.lock().unwrap().clone();
        ids.sort();
        ids
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }
}

#[async_trait]
impl CalendarApi for MockCalendarApi {
    async fn search_events(
        &self,
        _access_token: &str,
        query: &EventQuery,
    ) -> AppResult<Vec<CalendarEvent>> {
        self.searches.lock().unwrap().push(query.clone());
        if self.fail_search {
            return Err(google_calendar_error("Failed to fetch events: HTTP 500"));
        }
        Ok(self.events.clone())
    }

    async fn delete_event(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        event_id: &str,
    ) -> AppResult<()> {
        self.deletes.lock().unwrap().push(event_id.to_string());
        if self.failing_ids.contains(event_id) {
            return Err(google_calendar_error("Failed to delete event: HTTP 404"));
        }
        Ok(())
    }

    async fn list_calendars(&self, _access_token: &str) -> AppResult<Vec<CalendarListEntry>> {
        Ok(self.calendars.clone())
    }
}

/// Console fed from a fixed list of answers
#[derive(Default)]
pub struct ScriptedConsole {
    pub answers: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn say(&mut self, line: &str) -> AppResult<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    async fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| console_error("no scripted answer left"))
    }
}
