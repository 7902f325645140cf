pub mod auth;
pub mod client;
pub mod models;
pub mod remover;
pub mod token;

pub use auth::Authenticator;
pub use client::{CalendarApi, GoogleCalendarClient};
pub use models::{CalendarEvent, CalendarListEntry, EventQuery, EventStatus};
pub use remover::{remove_events, DeleteOutcome, RemovalReport};
pub use token::{AuthToken, TokenStore};
