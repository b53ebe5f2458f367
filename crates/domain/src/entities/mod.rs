//! Domain entities - Objects with identity and lifecycle

mod birthday_contact;
mod birthday_event;

pub use birthday_contact::BirthdayContact;
pub use birthday_event::BirthdayEvent;
