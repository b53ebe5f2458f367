//! Codec ports for vCard decoding and iCalendar encoding

use domain::{BirthdayEvent, ContactRecord};
#[cfg(test)]
use mockall::automock;

use super::SourceError;

/// A decoded address book record
pub type DecodedRecord = Box<dyn ContactRecord + Send + Sync>;

/// Turns the text of a `.vcf` file into records
#[cfg_attr(test, automock)]
pub trait ContactDecoderPort: Send + Sync {
    /// Decode every vCard contained in `text`
    fn decode(&self, text: &str) -> Result<Vec<DecodedRecord>, SourceError>;
}

/// Renders an event as a calendar object
#[cfg_attr(test, automock)]
pub trait EventEncoderPort: Send + Sync {
    /// Serialize `event` as a complete iCalendar document
    fn encode(&self, event: &BirthdayEvent) -> String;
}
