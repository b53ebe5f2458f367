//! Capability interface over a raw address book record

/// Read access to the three fields a birthday reminder needs.
///
/// Implemented by the vCard adapter; the domain never sees the vCard itself.
pub trait ContactRecord {
    /// Formatted name (vCard `FN`)
    fn full_name(&self) -> Option<&str>;

    /// Raw birthday value (vCard `BDAY`)
    fn birthday(&self) -> Option<&str>;

    /// Raw unique identifier (vCard `UID`)
    fn uid(&self) -> Option<&str>;
}
