//! Display strings derived from the profile.
//!
//! Every function here is pure and total over a conforming profile.

use crate::domain::{error::FormatError, record::Profile};

/// Qualifier removed by [`primary_title`]. Only this exact literal is stripped.
pub const SENIORITY_PREFIX: &str = "Senior ";

/// The part of `profile.name` before the first space.
///
/// A name without spaces is returned whole.
pub fn first_name(profile: &Profile) -> Result<&str, FormatError> {
    let name = profile.name.as_str();
    if name.is_empty() {
        return Err(FormatError::EmptyName);
    }

    let first = name.split_once(' ').map_or(name, |(head, _)| head);
    if first.is_empty() {
        return Err(FormatError::EmptyFirstName {
            name: name.to_owned(),
        });
    }
    Ok(first)
}

/// `profile.role` with a leading `"Senior "` removed, once.
///
/// "Lead Product Manager" and "Sr. Analyst" pass through unchanged.
pub fn primary_title(profile: &Profile) -> &str {
    profile
        .role
        .strip_prefix(SENIORITY_PREFIX)
        .unwrap_or(&profile.role)
}

/// Up to two uppercase initials for the avatar ("Swaathy Kamaraj" -> "SK").
pub fn initials(profile: &Profile) -> Result<String, FormatError> {
    if profile.name.trim().is_empty() {
        return Err(FormatError::EmptyName);
    }

    Ok(profile
        .name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect())
}

/// Single-letter logo mark taken from the first name.
pub fn brand_mark(profile: &Profile) -> Result<char, FormatError> {
    let first = first_name(profile)?;
    // first_name never returns an empty string
    let mark = first.chars().next().ok_or(FormatError::EmptyName)?;
    Ok(mark.to_uppercase().next().unwrap_or(mark))
}
