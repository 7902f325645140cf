use super::models::{CalendarEvent, CalendarListEntry, CalendarListPage, EventQuery, EventsPage};
use crate::error::{google_calendar_error, AppResult};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

/// Calls made against the remote calendar service
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Search upcoming events matching the query; a single result page
    async fn search_events(&self, access_token: &str, query: &EventQuery)
        -> AppResult<Vec<CalendarEvent>>;

    /// Delete one event
    async fn delete_event(&self, access_token: &str, calendar_id: &str, event_id: &str)
        -> AppResult<()>;

    /// Calendars visible to the user
    async fn list_calendars(&self, access_token: &str) -> AppResult<Vec<CalendarListEntry>>;
}

/// REST client for the Google Calendar v3 API
#[derive(Clone)]
pub struct GoogleCalendarClient {
    base_url: String,
    client: Client,
}

impl GoogleCalendarClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| google_calendar_error("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn check(response: Response, action: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        Err(google_calendar_error(&format!(
            "Failed to {}: HTTP {} - {}",
            action, status, error_body
        )))
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn search_events(
        &self,
        access_token: &str,
        query: &EventQuery,
    ) -> AppResult<Vec<CalendarEvent>> {
        let mut url = self.endpoint(&["calendars", &query.calendar_id, "events"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair(
                    "timeMin",
                    &query.time_min.to_rfc3339_opts(SecondsFormat::Secs, true),
                )
                .append_pair("q", &query.query)
                .append_pair("maxResults", &query.max_results.to_string());
            if query.expand_recurring {
                pairs
                    .append_pair("singleEvents", "true")
                    .append_pair("orderBy", "startTime");
            }
        }

        debug!("Searching events: {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        let page: EventsPage = Self::check(response, "fetch events")
            .await?
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(page.items)
    }

    async fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> AppResult<()> {
        let url = self.endpoint(&["calendars", calendar_id, "events", event_id])?;

        let response = self
            .client
            .delete(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to delete event {}: {}", event_id, e)))?;

        Self::check(response, &format!("delete event {}", event_id)).await?;
        Ok(())
    }

    async fn list_calendars(&self, access_token: &str) -> AppResult<Vec<CalendarListEntry>> {
        let mut url = self.endpoint(&["users", "me", "calendarList"])?;
        url.query_pairs_mut().append_pair("maxResults", "250");

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch calendars: {}", e)))?;

        let page: CalendarListPage = Self::check(response, "fetch calendars")
            .await?
            .json()
            .await
            .map_err(|e| {
                google_calendar_error(&format!("Failed to parse calendar list response: {}", e))
            })?;

        Ok(page.items)
    }
}
