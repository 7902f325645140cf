use super::client::CalendarApi;
use super::models::CalendarEvent;
use futures::future::join_all;
use tracing::{error, info};

/// What happened to one matched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    SkippedCancelled,
    Failed(String),
}

/// Per-event outcomes of a removal batch, in the order the events were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub outcomes: Vec<(String, DeleteOutcome)>,
}

impl RemovalReport {
    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::Deleted))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::SkippedCancelled))
    }

    /// Number of delete requests that were issued
    pub fn attempted(&self) -> usize {
        self.deleted() + self.failed()
    }

    fn count(&self, pred: impl Fn(&DeleteOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Delete every non-cancelled event concurrently and collect each outcome
pub async fn remove_events<A: CalendarApi + ?Sized>(
    api: &A,
    access_token: &str,
    calendar_id: &str,
    events: &[CalendarEvent],
) -> RemovalReport {
    let requests = events.iter().map(|event| async move {
        if event.is_cancelled() {
            return (event.id.clone(), DeleteOutcome::SkippedCancelled);
        }

        match api.delete_event(access_token, calendar_id, &event.id).await {
            Ok(()) => {
                info!("Deleted event {} ({})", event.id, event.summary_label());
                (event.id.clone(), DeleteOutcome::Deleted)
            }
            Err(e) => {
                error!("Error deleting {}: {}", event.id, e);
                (event.id.clone(), DeleteOutcome::Failed(e.to_string()))
            }
        }
    });

    RemovalReport {
        outcomes: join_all(requests).await,
    }
}
