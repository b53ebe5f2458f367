//! vCard parsing
//!
//! Only the properties a birthday calendar needs are kept: `FN`, `BDAY` and
//! `UID`. A single `.vcf` file may hold several cards.

use domain::ContactRecord;

use crate::client::CardDavError;

/// The fields of one `BEGIN:VCARD ... END:VCARD` block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    pub full_name: Option<String>,
    pub birthday: Option<String>,
    pub uid: Option<String>,
}

impl ContactRecord for VCard {
    fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    fn birthday(&self) -> Option<&str> {
        self.birthday.as_deref()
    }

    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }
}

/// Parse every card in `data`
///
/// Lines outside a card are ignored. A card without `END:VCARD` is an error.
pub fn parse_vcards(data: &str) -> Result<Vec<VCard>, CardDavError> {
    let mut cards = Vec::new();
    let mut current: Option<VCard> = None;
    let mut depth = 0usize;

    for line in unfold_vcard_lines(data) {
        if line.trim().is_empty() {
            continue;
        }

        let Some((prop_with_params, value)) = line.split_once(':') else {
            continue;
        };
        let (prop_name, _params) = split_property(prop_with_params);

        match prop_name.as_str() {
            "BEGIN" if current.is_none() => {
                if value.trim().eq_ignore_ascii_case("VCARD") {
                    current = Some(VCard::default());
                }
            },
            // Nested components (e.g. AGENT) are skipped
            "BEGIN" => depth += 1,
            "END" if depth > 0 => depth -= 1,
            "END" => {
                if value.trim().eq_ignore_ascii_case("VCARD") {
                    if let Some(card) = current.take() {
                        cards.push(card);
                    }
                }
            },
            _ if depth > 0 => {},
            name => {
                let Some(card) = current.as_mut() else {
                    continue;
                };
                match name {
                    "FN" => card.full_name = Some(unescape_text(value)),
                    "BDAY" => card.birthday = Some(value.trim().to_string()),
                    "UID" => card.uid = Some(value.trim().to_string()),
                    _ => {},
                }
            },
        }
    }

    if current.is_some() {
        return Err(CardDavError::ParseError(
            "vCard is missing END:VCARD".to_string(),
        ));
    }

    Ok(cards)
}

/// Upper-cased property name without group prefix, plus raw parameters
fn split_property(prop_with_params: &str) -> (String, Option<&str>) {
    let (name, params) = match prop_with_params.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (prop_with_params, None),
    };
    // item1.FN -> FN
    let name = name.rsplit_once('.').map_or(name, |(_, name)| name);
    (name.trim().to_uppercase(), params)
}

/// Unfold continuation lines in vCard data (RFC 2425 line folding)
fn unfold_vcard_lines(data: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for line in data.lines() {
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            current.push_str(rest);
        } else {
            if !current.is_empty() {
                lines.push(current.clone());
            }
            current = line.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Resolve `\,`, `\;`, `\\` and `\n` escapes in a text value
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
