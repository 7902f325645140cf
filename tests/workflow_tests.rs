mod common;

use chrono::{TimeZone, Utc};
use common::{event, MockCalendarApi, ScriptedConsole};
use remove_meetings::components::google_calendar::models::{CalendarListEntry, EventStatus};
use remove_meetings::components::google_calendar::{remove_events, DeleteOutcome};
use remove_meetings::config::RunConfig;
use remove_meetings::error::Error;
use remove_meetings::workflow::{list_calendars, run_removal, RunOutcome};

fn standup_events() -> Vec<remove_meetings::components::google_calendar::CalendarEvent> {
    vec![
        event("a", "Standup", EventStatus::Confirmed),
        event("b", "Standup", EventStatus::Cancelled),
        event("c", "Standup (tentative)", EventStatus::Tentative),
    ]
}

fn run_config() -> RunConfig {
    RunConfig::new("standup", 10, "primary").unwrap()
}

/// Three matches, one cancelled: all three listed, exactly two deleted
#[tokio::test]
async fn test_standup_scenario_lists_three_deletes_two() {
    let api = MockCalendarApi::with_events(standup_events());
    let mut console = ScriptedConsole::answering(&["y"]);
    let run = run_config().with_list(true);

    let outcome = run_removal(&run, &api, "token", &mut console, Utc::now())
        .await
        .unwrap();

    let listed = console
        .output
        .iter()
        .filter(|line| line.starts_with("Summary: "))
        .count();
    assert_eq!(listed, 3);
    assert!(console.printed("Upcoming 3 events"));
    assert!(console.printed("Start: 2026-10-20T09:30:00+02:00 - EventId: a"));

    assert_eq!(api.deleted_ids(), vec!["a".to_string(), "c".to_string()]);
    match outcome {
        RunOutcome::Removed(report) => {
            assert_eq!(report.deleted(), 2);
            assert_eq!(report.skipped(), 1);
            assert_eq!(report.failed(), 0);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(console.printed("Events removed successfully."));
}

#[tokio::test]
async fn test_empty_answer_confirms() {
    let api = MockCalendarApi::with_events(standup_events());
    let mut console = ScriptedConsole::answering(&[""]);

    let outcome = run_removal(&run_config(), &api, "token", &mut console, Utc::now())
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Removed(_)));
    assert_eq!(api.deleted_ids().len(), 2);
    assert_eq!(
        console.prompts,
        vec!["2 events will be removed. Do you want to continue (Y/n)? ".to_string()]
    );
}

#[tokio::test]
async fn test_negative_answer_deletes_nothing() {
    for answer in ["n", "no", "S", "maybe"] {
        let api = MockCalendarApi::with_events(standup_events());
        let mut console = ScriptedConsole::answering(&[answer]);

        let outcome = run_removal(&run_config(), &api, "token", &mut console, Utc::now())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Declined { found: 3 });
        assert!(api.deleted_ids().is_empty(), "answer {:?} deleted events", answer);
        assert_eq!(console.prompts.len(), 1);
    }
}

#[tokio::test]
async fn test_simulated_never_prompts_or_deletes() {
    for answers in [vec!["y"], vec![""], vec!["n"]] {
        let api = MockCalendarApi::with_events(standup_events());
        let mut console = ScriptedConsole::answering(&answers);
        let run = run_config().with_simulated(true);

        let outcome = run_removal(&run, &api, "token", &mut console, Utc::now())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Simulated { found: 3 });
        assert!(console.prompts.is_empty());
        assert!(api.deleted_ids().is_empty());
        // Without -l only the count is printed
        assert!(!console.printed("Summary: "));
    }
}

#[tokio::test]
async fn test_no_results_ends_without_prompt() {
    let api = MockCalendarApi::default();
    let mut console = ScriptedConsole::default();

    let outcome = run_removal(&run_config(), &api, "token", &mut console, Utc::now())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::NoResults);
    assert!(console.prompts.is_empty());
    assert_eq!(console.output, vec!["No upcoming events found.".to_string()]);
}

#[tokio::test]
async fn test_only_cancelled_matches_issue_no_deletes() {
    let api = MockCalendarApi::with_events(vec![
        event("x", "Standup", EventStatus::Cancelled),
        event("y", "Standup", EventStatus::Cancelled),
    ]);
    let mut console = ScriptedConsole::answering(&["y"]);

    let outcome = run_removal(&run_config(), &api, "token", &mut console, Utc::now())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::NothingToRemove { found: 2 });
    assert!(console.prompts.is_empty());
    assert!(api.deleted_ids().is_empty());
}

#[tokio::test]
async fn test_search_error_stops_the_run() {
    let api = MockCalendarApi {
        events: standup_events(),
        fail_search: true,
        ..Default::default()
    };
    let mut console = ScriptedConsole::answering(&["y"]);

    let result = run_removal(&run_config(), &api, "token", &mut console, Utc::now()).await;

    assert!(matches!(result, Err(Error::GoogleCalendar(_))));
    assert!(console.prompts.is_empty());
    assert!(api.deleted_ids().is_empty());
}

#[tokio::test]
async fn test_search_scoped_to_invocation_time() {
    let api = MockCalendarApi::default();
    let mut console = ScriptedConsole::default();
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    let run = RunConfig::new("retro", 42, "team@example.com")
        .unwrap()
        .with_expand_recurring(true);

    run_removal(&run, &api, "token", &mut console, now).await.unwrap();

    let searches = api.searches.lock().unwrap();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].time_min, now);
    assert_eq!(searches[0].query, "retro");
    assert_eq!(searches[0].max_results, 42);
    assert_eq!(searches[0].calendar_id, "team@example.com");
    assert!(searches[0].expand_recurring);
}

#[tokio::test]
async fn test_partial_failures_do_not_abort_batch() {
    let mut api = MockCalendarApi::with_events(vec![
        event("1", "Sync", EventStatus::Confirmed),
        event("2", "Sync", EventStatus::Confirmed),
        event("3", "Sync", EventStatus::Confirmed),
    ]);
    api.failing_ids.insert("2".to_string());
    let mut console = ScriptedConsole::answering(&["Y"]);

    let outcome = run_removal(&run_config(), &api, "token", &mut console, Utc::now())
        .await
        .unwrap();

    assert_eq!(api.deleted_ids().len(), 3);
    let RunOutcome::Removed(report) = outcome else {
        panic!("expected a removal report");
    };
    assert_eq!(report.deleted(), 2);
    assert_eq!(report.failed(), 1);
    assert!(console.printed("Removed 2 of 3 events (1 failed)."));
}

#[tokio::test]
async fn test_remover_keeps_input_order() {
    let mut api = MockCalendarApi::default();
    api.failing_ids.insert("b".to_string());
    let events = standup_events();

    let report = remove_events(&api, "token", "primary", &events).await;

    let ids: Vec<&str> = report.outcomes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(report.outcomes[0].1, DeleteOutcome::Deleted);
    assert_eq!(report.outcomes[1].1, DeleteOutcome::SkippedCancelled);
    assert_eq!(report.outcomes[2].1, DeleteOutcome::Deleted);
    assert_eq!(report.attempted(), 2);
}

#[tokio::test]
async fn test_list_calendars_prints_summary_and_id() {
    let api = MockCalendarApi {
        calendars: vec![
            CalendarListEntry {
                id: "primary@example.com".to_string(),
                summary: Some("Work".to_string()),
            },
            CalendarListEntry {
                id: "holidays".to_string(),
                summary: None,
            },
        ],
        ..Default::default()
    };
    let mut console = ScriptedConsole::default();

    let count = list_calendars(&api, "token", &mut console).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        console.output,
        vec![
            "Work - primary@example.com".to_string(),
            "(no title) - holidays".to_string()
        ]
    );
}
