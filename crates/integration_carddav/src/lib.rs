#![forbid(unsafe_code)]
//! CardDAV integration
//!
//! Reads vCard files from a WebDAV address book (Baïkal, Radicale, Nextcloud)
//! and extracts the name, birthday and UID of each card.

pub mod client;
pub mod vcard;

pub use client::{CardDavClient, CardDavConfig, CardDavError, HttpCardDavClient};
pub use vcard::{VCard, parse_vcards};
