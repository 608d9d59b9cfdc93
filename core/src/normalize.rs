//! Record normalization: slug derivation and date/time/email canonicalization.
//!
//! Pure string functions, no I/O. The lifecycle operations call these
//! explicitly before persisting; nothing in this crate normalizes as a side
//! effect of assignment.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};

/// Date formats accepted besides RFC 3339 timestamps, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",  // 2026-10-25
    "%m/%d/%Y",  // 10/25/2026
    "%d %b %Y",  // 25 Oct 2026
    "%b %d, %Y", // Oct 25, 2026
    "%B %d, %Y", // October 25, 2026
];

/// Derive a URL-safe slug from a title.
///
/// Lowercase, trim, strip characters outside `[a-z0-9_ -]`, collapse
/// whitespace runs and repeated hyphens into single hyphens, and trim
/// leading/trailing hyphens. Deterministic: equal titles produce equal slugs,
/// which is what makes the store's unique index a title-collision check.
///
/// A title with no ASCII alphanumerics slugifies to the empty string; the
/// caller treats that as a validation failure.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.trim().chars() {
        let mapped = if c.is_whitespace() { '-' } else { c };
        match mapped {
            '-' => pending_hyphen = true,
            c if c.is_ascii_alphanumeric() || c == '_' => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            }
            // Everything else (punctuation, non-ASCII) is stripped.
            _ => {}
        }
    }
    slug
}

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Accepts an RFC 3339 timestamp (normalized to its UTC calendar date) or any
/// of the plain formats in [`DATE_FORMATS`].
///
/// # Errors
///
/// [`DomainError::InvalidDate`] if the input parses as none of the accepted
/// forms.
pub fn normalize_date(input: &str) -> Result<String, DomainError> {
    let trimmed = input.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        let date = timestamp.with_timezone(&Utc).date_naive();
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }
    Err(DomainError::InvalidDate {
        input: input.to_owned(),
    })
}

/// Normalize a time string to zero-padded 24-hour `HH:MM`.
///
/// Accepts 24-hour `H:MM`/`HH:MM` (hour 0–23) or 12-hour `H:MM AM/PM`
/// (hour 1–12, at most one space before the case-insensitive period).
/// PM adds 12 to the hour except for 12 PM; 12 AM becomes 00. The minute must
/// be exactly two digits — `9:5` is rejected, not zero-padded.
///
/// # Errors
///
/// [`DomainError::InvalidTime`] if the input matches neither pattern.
pub fn normalize_time(input: &str) -> Result<String, DomainError> {
    let trimmed = input.trim();
    parse_24h(trimmed)
        .or_else(|| parse_12h(trimmed))
        .ok_or_else(|| DomainError::InvalidTime {
            input: input.to_owned(),
        })
}

/// Normalize an email address: trim, lowercase, then check the booking
/// pattern (no whitespace, a single `@`, an interior dot in the domain).
///
/// # Errors
///
/// [`DomainError::InvalidEmail`] if the normalized address fails the check.
pub fn normalize_email(input: &str) -> Result<String, DomainError> {
    let email = input.trim().to_lowercase();
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(DomainError::InvalidEmail {
            input: input.to_owned(),
        })
    }
}

/// Split `H:MM`/`HH:MM` into numeric parts. The hour is one or two digits;
/// the minute must be exactly two digits, `00`–`59`.
fn split_clock(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = s.split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let minute: u32 = minute.parse().ok()?;
    if minute > 59 {
        return None;
    }
    Some((hour.parse().ok()?, minute))
}

fn parse_24h(s: &str) -> Option<String> {
    let (hour, minute) = split_clock(s)?;
    (hour <= 23).then(|| format!("{hour:02}:{minute:02}"))
}

fn parse_12h(s: &str) -> Option<String> {
    let upper = s.to_ascii_uppercase();
    let (clock, is_pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest, false)
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest, true)
    } else {
        return None;
    };
    // At most one whitespace character between the clock and the period.
    let clock = clock.strip_suffix([' ', '\t']).unwrap_or(clock);
    if clock.ends_with(char::is_whitespace) {
        return None;
    }
    let (hour, minute) = split_clock(clock)?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Some(format!("{hour:02}:{minute:02}"))
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slug_strips_punctuation_and_hyphenates() {
        assert_eq!(slugify("Next.js Conf 2026!"), "nextjs-conf-2026");
        assert_eq!(slugify("React Summit"), "react-summit");
        assert_eq!(slugify("AWS re:Invent"), "aws-reinvent");
        assert_eq!(slugify("  Rust &  Friends  "), "rust-friends");
    }

    #[test]
    fn slug_collapses_and_trims_hyphens() {
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("--hello--world--"), "hello-world");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn slug_drops_non_ascii() {
        assert_eq!(slugify("Café Conf"), "caf-conf");
    }

    #[test]
    fn slug_of_pure_punctuation_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn date_accepts_iso_and_human_formats() {
        assert_eq!(normalize_date("2026-10-25").unwrap(), "2026-10-25");
        assert_eq!(normalize_date("10/25/2026").unwrap(), "2026-10-25");
        assert_eq!(normalize_date("25 Oct 2026").unwrap(), "2026-10-25");
        assert_eq!(normalize_date("October 25, 2026").unwrap(), "2026-10-25");
        assert_eq!(
            normalize_date("2026-10-25T18:30:00+02:00").unwrap(),
            "2026-10-25"
        );
    }

    #[test]
    fn date_rejects_garbage() {
        assert!(matches!(
            normalize_date("next tuesday"),
            Err(DomainError::InvalidDate { .. })
        ));
        assert!(matches!(
            normalize_date("2026-13-40"),
            Err(DomainError::InvalidDate { .. })
        ));
    }

    #[test]
    fn time_normalizes_twelve_hour_clock() {
        assert_eq!(normalize_time("9:05 PM").unwrap(), "21:05");
        assert_eq!(normalize_time("12:00 AM").unwrap(), "00:00");
        assert_eq!(normalize_time("12:00 PM").unwrap(), "12:00");
        assert_eq!(normalize_time("9:05pm").unwrap(), "21:05");
        assert_eq!(normalize_time("09:00 AM").unwrap(), "09:00");
    }

    #[test]
    fn time_pads_twenty_four_hour_clock() {
        assert_eq!(normalize_time("9:30").unwrap(), "09:30");
        assert_eq!(normalize_time("21:05").unwrap(), "21:05");
        assert_eq!(normalize_time("0:00").unwrap(), "00:00");
        assert_eq!(normalize_time("23:59").unwrap(), "23:59");
    }

    #[test]
    fn time_rejects_malformed_input() {
        for input in ["9:5", "24:00", "13:00 PM", "0:00 AM", "9:05  PM", "noon", "9.05"] {
            assert!(
                matches!(normalize_time(input), Err(DomainError::InvalidTime { .. })),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn email_rejects_malformed_input() {
        for input in ["no-at-sign", "two@@example.com", "a@b", "a b@example.com", "@example.com", "a@.", "a@b."] {
            assert!(
                matches!(normalize_email(input), Err(DomainError::InvalidEmail { .. })),
                "expected {input:?} to be rejected"
            );
        }
    }

    proptest! {
        /// Slugs contain only `[a-z0-9_-]`, never start or end with a
        /// hyphen, and never contain a double hyphen.
        #[test]
        fn slug_shape_holds_for_any_title(title in ".{0,64}") {
            let slug = slugify(&title);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || c == '_'
                || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        /// Slug derivation is deterministic and idempotent: a slug slugifies
        /// to itself.
        #[test]
        fn slug_is_idempotent(title in ".{0,64}") {
            let once = slugify(&title);
            prop_assert_eq!(slugify(&once), once.clone());
        }

        /// Normalized times are always zero-padded `HH:MM` within range.
        #[test]
        fn normalized_time_is_canonical(hour in 0u32..24, minute in 0u32..60) {
            let input = format!("{hour}:{minute:02}");
            let out = normalize_time(&input).unwrap();
            prop_assert_eq!(out, format!("{hour:02}:{minute:02}"));
        }
    }
}
