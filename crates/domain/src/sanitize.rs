//! Normalization of raw contact identifiers, names and owner labels

const CONTACTS_PREFIX: &str = "contacts-";
const UUID_PREFIX: &str = "uuid-";

/// Strip the `contacts-` and `uuid-` prefixing conventions from a raw UID.
///
/// Everything up to and including the last `contacts-` is removed, then
/// everything up to and including the last `uuid-` of what remains.
///
/// ```
/// use domain::sanitize::clean_identifier;
///
/// assert_eq!(
///     clean_identifier("contacts-uuid-550e8400-e29b-41d4-a716-446655440000"),
///     "550e8400-e29b-41d4-a716-446655440000"
/// );
/// ```
pub fn clean_identifier(raw: &str) -> &str {
    let rest = raw
        .rsplit_once(CONTACTS_PREFIX)
        .map_or(raw, |(_, tail)| tail);
    rest.rsplit_once(UUID_PREFIX).map_or(rest, |(_, tail)| tail)
}

/// Clean up a display name as exported by common address books.
///
/// Double spaces are collapsed in a single pass (three spaces become two),
/// quoted spaces (`' '`) become a plain space and one trailing space is
/// dropped.
///
/// ```
/// use domain::sanitize::clean_name;
///
/// assert_eq!(clean_name("Anna  Maria "), "Anna Maria");
/// ```
pub fn clean_name(raw: &str) -> String {
    let mut clean = raw.replace("  ", " ").replace("' '", " ");
    if clean.ends_with(' ') {
        clean.pop();
    }
    clean
}

/// Upper-case the first character of an account label.
pub fn capitalize_owner(owner: &str) -> String {
    let mut chars = owner.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Disambiguate generic parent names by the owning account.
///
/// Only a whole-name match of "mama" or "papa" (ASCII case-insensitive) is
/// rewritten to `"{name} von {Owner}"`.
///
/// ```
/// use domain::sanitize::fix_parents;
///
/// assert_eq!(fix_parents("Mama", "klaus"), "Mama von Klaus");
/// assert_eq!(fix_parents("Mama Bear", "klaus"), "Mama Bear");
/// ```
pub fn fix_parents(name: &str, owner: &str) -> String {
    if is_parent_name(name) {
        format!("{name} von {}", capitalize_owner(owner))
    } else {
        name.to_string()
    }
}

fn is_parent_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("mama") || name.eq_ignore_ascii_case("papa")
}
