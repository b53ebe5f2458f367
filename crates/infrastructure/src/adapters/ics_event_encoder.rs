//! iCalendar encoder - Implements `EventEncoderPort` using `integration_caldav`

use application::ports::EventEncoderPort;
use domain::BirthdayEvent;
use integration_caldav::build_birthday_calendar;

/// Renders events as single-event `VCALENDAR` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct IcsEventEncoder;

impl EventEncoderPort for IcsEventEncoder {
    fn encode(&self, event: &BirthdayEvent) -> String {
        build_birthday_calendar(event)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn encodes_event() {
        let event = BirthdayEvent::all_day(
            Uuid::from_u128(42),
            "Mama von Klaus hat Geburtstag",
            NaiveDate::from_ymd_opt(2027, 3, 14).unwrap(),
        )
        .unwrap();

        let ics = IcsEventEncoder.encode(&event);
        assert!(ics.contains("UID:00000000-0000-0000-0000-00000000002a"));
        assert!(ics.contains("SUMMARY:Mama von Klaus hat Geburtstag"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20270314"));
    }
}
