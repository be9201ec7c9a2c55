//! Family abbreviation table
//!
//! Both revisions number families the same way (`3.<n>` / `03.<nn>`); Rev 3
//! adds families 15-17.

/// A control family as known by number and abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyInfo {
    /// Family number within the control id
    pub number: u8,
    /// Two-letter abbreviation used by CMMC practice ids (e.g. `AC.L2-3.1.1`)
    pub abbreviation: &'static str,
    /// Full family name
    pub name: &'static str,
}

const fn family(number: u8, abbreviation: &'static str, name: &'static str) -> FamilyInfo {
    FamilyInfo {
        number,
        abbreviation,
        name,
    }
}

/// Families in id order
pub const FAMILY_TABLE: [FamilyInfo; 17] = [
    family(1, "AC", "Access Control"),
    family(2, "AT", "Awareness and Training"),
    family(3, "AU", "Audit and Accountability"),
    family(4, "CM", "Configuration Management"),
    family(5, "IA", "Identification and Authentication"),
    family(6, "IR", "Incident Response"),
    family(7, "MA", "Maintenance"),
    family(8, "MP", "Media Protection"),
    family(9, "PS", "Personnel Security"),
    family(10, "PE", "Physical Protection"),
    family(11, "RA", "Risk Assessment"),
    family(12, "CA", "Security Assessment"),
    family(13, "SC", "System and Communications Protection"),
    family(14, "SI", "System and Information Integrity"),
    family(15, "PL", "Planning"),
    family(16, "SA", "System and Services Acquisition"),
    family(17, "SR", "Supply Chain Risk Management"),
];

/// Resolve the family of a control id of either revision
#[must_use]
pub fn family_for_control(control_id: &str) -> Option<&'static FamilyInfo> {
    let number: u8 = control_id.trim().split('.').nth(1)?.parse().ok()?;
    FAMILY_TABLE.iter().find(|f| f.number == number)
}

/// Resolve a family abbreviation to its full name
#[must_use]
pub fn family_name(abbreviation: &str) -> Option<&'static str> {
    FAMILY_TABLE
        .iter()
        .find(|f| f.abbreviation.eq_ignore_ascii_case(abbreviation))
        .map(|f| f.name)
}
