// crates/launch-gate-core/src/core/time.rs
// ============================================================================
// Module: Launch Gate Verification Time Model
// Description: Day-granular verification timestamps with staleness arithmetic.
// Purpose: Provide deterministic, replayable time values for evidence records.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Verification timestamps are normalized to the UTC day boundary; time of day
//! is dropped at construction. The core engine never reads wall-clock time;
//! callers must supply explicit `now`/`as_of` instants for every time-sensitive
//! operation.
//!
//! Live construction rejects instants whose UTC day is strictly after the
//! supplied `now`'s UTC day; a later instant on the same day is accepted.
//! Reconstruction from persisted data bypasses that check: historical records
//! must load even when the local clock has drifted backwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use thiserror::Error;
use time::Date;
use time::Duration;
use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default re-verification warning window in days.
pub const DEFAULT_WARNING_DAYS: u32 = 90;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing or rendering verification timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Live construction received an instant on a UTC day after `now`'s.
    #[error("verification timestamp {instant} is after now ({now})")]
    FutureInstant {
        /// The rejected instant, normalized to its UTC day.
        instant: Date,
        /// The reference `now`, normalized to its UTC day.
        now: Date,
    },
    /// Input could not be parsed as an RFC 3339 instant or calendar date.
    #[error("invalid verification timestamp `{raw}`")]
    Parse {
        /// The unparseable input text.
        raw: String,
    },
    /// Timestamp could not be rendered to its canonical wire form.
    #[error("failed to format verification timestamp: {0}")]
    Format(String),
}

// ============================================================================
// SECTION: Verification Timestamp
// ============================================================================

/// Instant normalized to a UTC day boundary.
///
/// # Invariants
/// - Carries calendar-day precision only; two instants within the same UTC
///   day compare equal and yield identical staleness arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerificationTimestamp(Date);

impl VerificationTimestamp {
    /// Creates a timestamp from a live instant, rejecting future values.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::FutureInstant`] when `instant` falls on a UTC
    /// day strictly after `now`'s UTC day.
    pub fn new(instant: OffsetDateTime, now: OffsetDateTime) -> Result<Self, TimestampError> {
        let instant_day = instant.to_offset(UtcOffset::UTC).date();
        let now_day = now.to_offset(UtcOffset::UTC).date();
        if instant_day > now_day {
            return Err(TimestampError::FutureInstant {
                instant: instant_day,
                now: now_day,
            });
        }
        Ok(Self(instant_day))
    }

    /// Creates a timestamp from a persisted instant, bypassing the future check.
    #[must_use]
    pub fn from_persisted(instant: OffsetDateTime) -> Self {
        Self(instant.to_offset(UtcOffset::UTC).date())
    }

    /// Creates a timestamp directly from a UTC calendar day.
    #[must_use]
    pub const fn from_day(day: Date) -> Self {
        Self(day)
    }

    /// Returns the UTC calendar day carried by this timestamp.
    #[must_use]
    pub const fn day(self) -> Date {
        self.0
    }

    /// Returns true iff `reference` is strictly after this timestamp plus
    /// `ttl_days` days.
    #[must_use]
    pub fn is_stale_by(self, reference: Self, ttl_days: u32) -> bool {
        reference.0 > self.expiry_date(ttl_days).0
    }

    /// Returns the expiry day: this timestamp plus `ttl_days` days.
    #[must_use]
    pub fn expiry_date(self, ttl_days: u32) -> Self {
        Self(
            self.0
                .checked_add(Duration::days(i64::from(ttl_days)))
                .unwrap_or(Date::MAX),
        )
    }

    /// Returns the re-verification due day: this timestamp plus `ttl_days`
    /// minus `warning_days`. The offset is signed; a warning window wider than
    /// the TTL yields a due day before the timestamp itself.
    #[must_use]
    pub fn reverification_due_date(self, ttl_days: u32, warning_days: u32) -> Self {
        let offset = i64::from(ttl_days) - i64::from(warning_days);
        let clamp = if offset >= 0 { Date::MAX } else { Date::MIN };
        Self(self.0.checked_add(Duration::days(offset)).unwrap_or(clamp))
    }

    /// Returns the signed day count from `reference` to the re-verification
    /// due day. Negative values mean the due day has passed.
    #[must_use]
    pub fn days_until_reverification_due(
        self,
        reference: Self,
        ttl_days: u32,
        warning_days: u32,
    ) -> i64 {
        let due = self.reverification_due_date(ttl_days, warning_days);
        i64::from(due.0.to_julian_day()) - i64::from(reference.0.to_julian_day())
    }

    /// Parses the canonical wire form, bypassing the future-instant check.
    ///
    /// Accepts a full RFC 3339 instant or a bare `YYYY-MM-DD` calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Parse`] when the input matches neither form.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
            return Ok(Self::from_persisted(instant));
        }
        parse_calendar_date(value).map(Self).ok_or_else(|| TimestampError::Parse {
            raw: value.to_string(),
        })
    }

    /// Renders the canonical wire form: an RFC 3339 instant at UTC midnight.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Format`] when formatting fails.
    pub fn to_rfc3339(self) -> Result<String, TimestampError> {
        self.0
            .midnight()
            .assume_utc()
            .format(&Rfc3339)
            .map_err(|err| TimestampError::Format(err.to_string()))
    }
}

impl fmt::Display for VerificationTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for VerificationTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = self.to_rfc3339().map_err(S::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for VerificationTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

// ============================================================================
// SECTION: Parsing Helpers
// ============================================================================

/// Parses a bare `YYYY-MM-DD` calendar date.
fn parse_calendar_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let month = time::Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
