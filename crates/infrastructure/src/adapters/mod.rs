//! Adapters implementing application ports

mod ics_event_encoder;
mod vcard_decoder;
mod webdav_calendar_sink;
mod webdav_contact_source;

pub use ics_event_encoder::IcsEventEncoder;
pub use vcard_decoder::VCardDecoder;
pub use webdav_calendar_sink::WebDavCalendarSink;
pub use webdav_contact_source::WebDavContactSource;
