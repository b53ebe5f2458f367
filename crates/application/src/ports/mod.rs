//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod calendar_sink_port;
mod codec_port;
mod contact_source_port;

#[cfg(test)]
pub use calendar_sink_port::MockCalendarSinkPort;
pub use calendar_sink_port::{CalendarSinkPort, SinkError};
#[cfg(test)]
pub use codec_port::{MockContactDecoderPort, MockEventEncoderPort};
pub use codec_port::{ContactDecoderPort, DecodedRecord, EventEncoderPort};
#[cfg(test)]
pub use contact_source_port::MockContactSourcePort;
pub use contact_source_port::{ContactSourcePort, SourceError};
