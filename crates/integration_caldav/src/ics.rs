//! iCalendar generation for birthday events

use chrono::{DateTime, Utc};
use domain::BirthdayEvent;
use icalendar::{Calendar, Component, EventLike};

/// Render `event` as a `VCALENDAR` holding a single all-day `VEVENT`
pub fn build_birthday_calendar(event: &BirthdayEvent) -> String {
    build_birthday_calendar_at(event, Utc::now())
}

/// Same as [`build_birthday_calendar`] with a fixed `DTSTAMP`
pub fn build_birthday_calendar_at(event: &BirthdayEvent, stamp: DateTime<Utc>) -> String {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid.to_string());
    ics_event.summary(&event.summary);
    ics_event.timestamp(stamp);
    ics_event.starts(event.start);
    ics_event.ends(event.end);

    let mut cal = Calendar::new();
    cal.push(ics_event.done());
    cal.done().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn event() -> BirthdayEvent {
        BirthdayEvent::all_day(
            Uuid::from_u128(0x6f1c_1bd2_3b69_4ad6_9a2c_2c6d_2b1e_7f10 + 2026),
            "Anna hat Geburtstag (36)",
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn renders_all_day_event() {
        let stamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let ics = build_birthday_calendar_at(&event(), stamp);

        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("UID:6f1c1bd2-3b69-4ad6-9a2c-2c6d2b1e86fa"));
        assert!(ics.contains("SUMMARY:Anna hat Geburtstag (36)"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20260501"));
        assert!(ics.contains("DTEND;VALUE=DATE:20260502"));
        assert!(ics.contains("DTSTAMP:20260102T030405Z"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn contains_exactly_one_event() {
        let ics = build_birthday_calendar(&event());
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn end_crosses_year_boundary() {
        let event = BirthdayEvent::all_day(
            Uuid::nil(),
            "Silvester hat Geburtstag",
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
        .unwrap();
        let ics = build_birthday_calendar(&event);
        assert!(ics.contains("DTEND;VALUE=DATE:20270101"));
    }
}
