//! Domain-level errors: validation and normalization failures.
//!
//! These are the user-displayable failures — a missing field, a date that
//! does not parse, a time in neither accepted format. Backend failures live
//! with their seams ([`crate::store::StoreError`], [`crate::cache::CacheError`],
//! [`crate::media::MediaError`]) and everything is folded together at the
//! service layer ([`crate::service::ServiceError`]).

use thiserror::Error;

/// A validation or normalization failure on a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field is missing, blank, or malformed.
    #[error("{field} {reason}")]
    Validation {
        /// Field the check failed on.
        field: &'static str,
        /// Human-readable reason, phrased to follow the field name.
        reason: String,
    },

    /// The date string does not parse as a calendar date.
    #[error("invalid date format '{input}': use a valid date string")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// The time string matches neither `HH:MM` nor `H:MM AM/PM`.
    #[error("invalid time format '{input}': use HH:MM or HH:MM AM/PM")]
    InvalidTime {
        /// The rejected input.
        input: String,
    },

    /// The email address fails the booking pattern check.
    #[error("invalid email format '{input}'")]
    InvalidEmail {
        /// The rejected input.
        input: String,
    },
}

impl DomainError {
    /// Shorthand for a [`DomainError::Validation`] with an owned reason.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
