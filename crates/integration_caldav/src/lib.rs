//! CalDAV integration
//!
//! Uploads iCalendar objects to a CalDAV calendar (Baïkal, Radicale, Nextcloud)
//! and renders birthday events as iCalendar.

pub mod client;
pub mod ics;

pub use client::{CalDavClient, CalDavConfig, CalDavError, HttpCalDavClient};
pub use ics::{build_birthday_calendar, build_birthday_calendar_at};
