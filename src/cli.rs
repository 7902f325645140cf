use crate::config::{Defaults, RunConfig, MAX_RESULTS_LIMIT};
use crate::error::AppResult;
use clap::{ArgAction, Parser};

/// Remove a list of meetings from Google Calendar.
#[derive(Debug, Clone, Parser)]
#[command(name = "remove-meetings", version)]
#[command(override_usage = "remove-meetings [OPTIONS] <MEETING_NAME>")]
pub struct Cli {
    /// Text matched against event summaries and descriptions
    #[arg(value_name = "MEETING_NAME", required_unless_present = "list_calendars")]
    pub query: Option<String>,

    /// Show the list of events
    #[arg(short, long)]
    pub list: bool,

    /// Only show the events to be removed; nothing is deleted
    #[arg(short, long)]
    pub simulated: bool,

    /// Maximum number of events to search for
    #[arg(short = 'M', long, value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS_LIMIT as i64))]
    pub max_results: Option<u32>,

    /// Calendar to search
    #[arg(short, long)]
    pub calendar_id: Option<String>,

    /// Expand recurring series and remove single occurrences instead of whole series
    #[arg(long)]
    pub expand_recurring: bool,

    /// Open the authorization page in the default browser
    #[arg(long)]
    pub open_browser: bool,

    /// List the calendars of the account and exit
    #[arg(long, conflicts_with_all = ["list", "simulated", "expand_recurring"])]
    pub list_calendars: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListCalendars,
    Remove(RunConfig),
}

impl Cli {
    /// Resolve the command, filling unset options from `defaults`
    pub fn resolve(&self, defaults: &Defaults) -> AppResult<Command> {
        if self.list_calendars {
            return Ok(Command::ListCalendars);
        }

        let run = RunConfig::new(
            self.query.as_deref().unwrap_or_default(),
            self.max_results.unwrap_or(defaults.max_results),
            self.calendar_id.as_deref().unwrap_or(&defaults.calendar_id),
        )?
        .with_list(self.list)
        .with_simulated(self.simulated)
        .with_expand_recurring(self.expand_recurring);

        Ok(Command::Remove(run))
    }
}
