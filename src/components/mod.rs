// Export components
pub mod console;
pub mod google_calendar;

// Re-export the pieces the workflow is built from
pub use console::{Console, StdConsole};
pub use google_calendar::{Authenticator, CalendarApi, GoogleCalendarClient};
