use crate::components::console::{confirm, Console};
use crate::components::google_calendar::{
    remove_events, CalendarApi, CalendarEvent, EventQuery, RemovalReport,
};
use crate::config::RunConfig;
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// How a removal run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search matched nothing
    NoResults,
    /// Simulate mode: events were found but nothing was touched
    Simulated { found: usize },
    /// Every match was already cancelled
    NothingToRemove { found: usize },
    /// The user answered no
    Declined { found: usize },
    /// Deletes were issued
    Removed(RemovalReport),
}

/// Search, optionally list, confirm, then remove matching events
pub async fn run_removal<A, C>(
    run: &RunConfig,
    api: &A,
    access_token: &str,
    console: &mut C,
    now: DateTime<Utc>,
) -> AppResult<RunOutcome>
where
    A: CalendarApi + ?Sized,
    C: Console + ?Sized,
{
    let query = EventQuery {
        query: run.query.clone(),
        max_results: run.max_results,
        calendar_id: run.calendar_id.clone(),
        time_min: now,
        expand_recurring: run.expand_recurring,
    };

    let events = api.search_events(access_token, &query).await.inspect_err(|e| {
        error!("The API returned an error: {}", e);
    })?;
    info!("Search for '{}' matched {} events", run.query, events.len());

    if events.is_empty() {
        console.say("No upcoming events found.").await?;
        return Ok(RunOutcome::NoResults);
    }

    console.say(&format!("Upcoming {} events", events.len())).await?;
    if run.list {
        list_events(console, &events).await?;
    }

    if run.simulated {
        return Ok(RunOutcome::Simulated {
            found: events.len(),
        });
    }

    let removable = events.iter().filter(|e| !e.is_cancelled()).count();
    if removable == 0 {
        console.say("All matching events are already cancelled.").await?;
        return Ok(RunOutcome::NothingToRemove {
            found: events.len(),
        });
    }

    if !confirm(console, removable).await? {
        info!("Removal declined by user");
        return Ok(RunOutcome::Declined {
            found: events.len(),
        });
    }

    let report = remove_events(api, access_token, &run.calendar_id, &events).await;
    if report.failed() == 0 {
        console.say("Events removed successfully.").await?;
    } else {
        console
            .say(&format!(
                "Removed {} of {} events ({} failed).",
                report.deleted(),
                report.attempted(),
                report.failed()
            ))
            .await?;
    }

    Ok(RunOutcome::Removed(report))
}

async fn list_events<C: Console + ?Sized>(console: &mut C, events: &[CalendarEvent]) -> AppResult<()> {
    for event in events {
        console
            .say(&format!(
                "Summary: {} - Start: {} - EventId: {}",
                event.summary_label(),
                event.start_label(),
                event.id
            ))
            .await?;
    }
    Ok(())
}

/// Print the user's calendars as `summary - id`
pub async fn list_calendars<A, C>(api: &A, access_token: &str, console: &mut C) -> AppResult<usize>
where
    A: CalendarApi + ?Sized,
    C: Console + ?Sized,
{
    let calendars = api.list_calendars(access_token).await.inspect_err(|e| {
        error!("The API returned an error: {}", e);
    })?;

    if calendars.is_empty() {
        console.say("No calendars found.").await?;
        return Ok(0);
    }

    for calendar in &calendars {
        console
            .say(&format!(
                "{} - {}",
                calendar.summary.as_deref().unwrap_or("(no title)"),
                calendar.id
            ))
            .await?;
    }

    Ok(calendars.len())
}
