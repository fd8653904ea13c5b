// crates/launch-gate-core/src/core/evidence.rs
// ============================================================================
// Module: Launch Gate Evidence Aggregate
// Description: Append-only verification history for one proof document.
// Purpose: Derive document status and validity from immutable event logs.
// Dependencies: crate::core::{event, identifiers, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! Evidence is the append-only event history for one tracked proof document.
//! Every mutation (`verify`, `reject`, `record_conflict`) returns a *new*
//! evidence value with exactly one appended trailing event; prior events are
//! never altered. Durability is the caller's responsibility.
//!
//! Two derivations deliberately disagree: [`Evidence::status`] inspects only
//! the absolute latest event, while [`Evidence::is_valid`] and the expiry and
//! due-date queries anchor on the latest *verified* event. A rejected document
//! can therefore still report "valid" from its older verified snapshot. Do not
//! unify the two derivations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::event::ConfidenceLevel;
use crate::core::event::EventError;
use crate::core::event::VerificationDecision;
use crate::core::event::VerificationEvent;
use crate::core::identifiers::DocumentKey;
use crate::core::identifiers::EventId;
use crate::core::time::VerificationTimestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Trailing window, in days, during which an unresolved conflict blocks
/// re-verification.
pub const CONFLICT_WINDOW_DAYS: u32 = 30;

/// Reason recorded on the seed event of freshly created evidence.
pub const REASON_CREATED: &str = "evidence_created";
/// Reason recorded on re-verification events.
pub const REASON_REVERIFIED: &str = "re_verified";
/// Verifier identity used when no explicit verifier is supplied.
const DEFAULT_VERIFIER: &str = "system";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by evidence construction and mutation.
///
/// These are invariant violations (broken preconditions), not data-quality
/// findings; boundary adapters downgrade them to "absent" rather than
/// propagating them into evaluation output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvidenceError {
    /// Construction was attempted with zero events.
    #[error("evidence requires at least one verification event")]
    EmptyEvents,
    /// TTL was not a positive day count.
    #[error("evidence ttl must be a positive day count, got {ttl_days}")]
    InvalidTtl {
        /// The rejected TTL value.
        ttl_days: u32,
    },
    /// A conflicted event within the trailing window blocks verification.
    #[error("evidence has an unresolved conflict within the last {window_days} days")]
    ConflictUnresolved {
        /// The conflict window applied, in days.
        window_days: u32,
    },
    /// Two events carried the same identifier.
    #[error("duplicate event id {event_id} in evidence history")]
    DuplicateEventId {
        /// The duplicated identifier.
        event_id: EventId,
    },
    /// Event construction failed.
    #[error(transparent)]
    Event(#[from] EventError),
}

// ============================================================================
// SECTION: Document Status
// ============================================================================

/// Status of one proof document, derived from the latest event only.
///
/// # Invariants
/// - Variants are stable for serialization and evaluation-tier ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Latest event is verified and within TTL.
    Present,
    /// Latest event is verified but past TTL.
    Expired,
    /// Latest event is a rejection.
    Stale,
    /// Latest event is a conflict.
    Conflicted,
}

// ============================================================================
// SECTION: Evidence
// ============================================================================

/// Append-only verification history for one proof document.
///
/// # Invariants
/// - `events` is non-empty, ordered, and append-only.
/// - Event identifiers are unique within this evidence's lifetime.
/// - `ttl_days` is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Key identifying the tracked document.
    document_key: DocumentKey,
    /// Human-readable document name.
    document_name: String,
    /// Days a verified document remains valid.
    ttl_days: u32,
    /// Ordered verification event history.
    events: Vec<VerificationEvent>,
}

impl Evidence {
    /// Creates fresh evidence seeded with one verified event.
    ///
    /// The seed event uses reason [`REASON_CREATED`], high confidence, and the
    /// supplied `now` as its timestamp. When `verifier` is `None`, a fixed
    /// system identity is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::InvalidTtl`] when `ttl_days` is zero.
    pub fn create(
        document_key: DocumentKey,
        document_name: impl Into<String>,
        ttl_days: u32,
        verifier: Option<&str>,
        now: VerificationTimestamp,
    ) -> Result<Self, EvidenceError> {
        if ttl_days == 0 {
            return Err(EvidenceError::InvalidTtl {
                ttl_days,
            });
        }
        let seed = VerificationEvent::new(
            EventId::new(1),
            now,
            VerificationDecision::Verified,
            verifier.unwrap_or(DEFAULT_VERIFIER),
            REASON_CREATED,
            ConfidenceLevel::High,
        )?;
        Ok(Self {
            document_key,
            document_name: document_name.into(),
            ttl_days,
            events: vec![seed],
        })
    }

    /// Reconstructs evidence from a persisted event sequence.
    ///
    /// Event identifiers are taken as-is from the persisted events; they are
    /// validated for uniqueness but never regenerated.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::EmptyEvents`] for an empty sequence,
    /// [`EvidenceError::InvalidTtl`] for a zero TTL,
    /// [`EvidenceError::DuplicateEventId`] for repeated identifiers, and
    /// [`EvidenceError::Event`] when any event carries an empty verifier or
    /// reason.
    pub fn from_events(
        document_key: DocumentKey,
        document_name: impl Into<String>,
        ttl_days: u32,
        events: Vec<VerificationEvent>,
    ) -> Result<Self, EvidenceError> {
        if ttl_days == 0 {
            return Err(EvidenceError::InvalidTtl {
                ttl_days,
            });
        }
        if events.is_empty() {
            return Err(EvidenceError::EmptyEvents);
        }
        for (index, event) in events.iter().enumerate() {
            if events.iter().take(index).any(|prior| prior.event_id == event.event_id) {
                return Err(EvidenceError::DuplicateEventId {
                    event_id: event.event_id,
                });
            }
            // Persisted events skip the constructor; re-check its invariants.
            if event.verifier.trim().is_empty() {
                return Err(EvidenceError::Event(EventError::EmptyVerifier));
            }
            if event.reason.trim().is_empty() {
                return Err(EvidenceError::Event(EventError::EmptyReason));
            }
        }
        Ok(Self {
            document_key,
            document_name: document_name.into(),
            ttl_days,
            events,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the tracked document key.
    #[must_use]
    pub const fn document_key(&self) -> &DocumentKey {
        &self.document_key
    }

    /// Returns the human-readable document name.
    #[must_use]
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Returns the TTL in days.
    #[must_use]
    pub const fn ttl_days(&self) -> u32 {
        self.ttl_days
    }

    /// Returns a read-only view of the full ordered event history.
    #[must_use]
    pub fn audit_trail(&self) -> &[VerificationEvent] {
        &self.events
    }

    // ------------------------------------------------------------------
    // Mutations (each returns a new value with one appended event)
    // ------------------------------------------------------------------

    /// Appends a verified event (reason [`REASON_REVERIFIED`]).
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::ConflictUnresolved`] when any conflicted
    /// event lies within the trailing [`CONFLICT_WINDOW_DAYS`] of `now`.
    pub fn verify(
        &self,
        verifier: &str,
        confidence: ConfidenceLevel,
        now: VerificationTimestamp,
    ) -> Result<Self, EvidenceError> {
        if self.has_recent_conflicts(now) {
            return Err(EvidenceError::ConflictUnresolved {
                window_days: CONFLICT_WINDOW_DAYS,
            });
        }
        self.append(VerificationEvent::new(
            self.next_event_id(),
            now,
            VerificationDecision::Verified,
            verifier,
            REASON_REVERIFIED,
            confidence,
        )?)
    }

    /// Appends a rejected event with the supplied reason.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::Event`] when the verifier or reason is empty.
    pub fn reject(
        &self,
        verifier: &str,
        reason: &str,
        now: VerificationTimestamp,
    ) -> Result<Self, EvidenceError> {
        self.append(VerificationEvent::new(
            self.next_event_id(),
            now,
            VerificationDecision::Rejected,
            verifier,
            reason,
            ConfidenceLevel::High,
        )?)
    }

    /// Appends a conflicted event recording both auditor identities.
    ///
    /// Confidence is forced to low: a disagreement carries no authority.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::Event`] when an identity or the reason is empty.
    pub fn record_conflict(
        &self,
        auditor_a: &str,
        auditor_b: &str,
        reason: &str,
        now: VerificationTimestamp,
    ) -> Result<Self, EvidenceError> {
        if auditor_a.trim().is_empty() || auditor_b.trim().is_empty() {
            return Err(EvidenceError::Event(EventError::EmptyVerifier));
        }
        self.append(VerificationEvent::new(
            self.next_event_id(),
            now,
            VerificationDecision::Conflicted,
            format!("{auditor_a} & {auditor_b}"),
            reason,
            ConfidenceLevel::Low,
        )?)
    }

    // ------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------

    /// Derives the document status from the single latest event.
    #[must_use]
    pub fn status(&self, as_of: VerificationTimestamp) -> DocumentStatus {
        let Some(event) = self.events.last() else {
            // Constructors guarantee a non-empty history; fail closed anyway.
            return DocumentStatus::Conflicted;
        };
        match event.decision {
            VerificationDecision::Conflicted => DocumentStatus::Conflicted,
            VerificationDecision::Rejected => DocumentStatus::Stale,
            VerificationDecision::Verified => {
                if event.timestamp.is_stale_by(as_of, self.ttl_days) {
                    DocumentStatus::Expired
                } else {
                    DocumentStatus::Present
                }
            }
        }
    }

    /// Returns true iff the most recent *verified* event is within TTL.
    ///
    /// This deliberately diverges from [`Self::status`], which inspects only
    /// the absolute latest event: a document whose latest event is a rejection
    /// can still be "valid" by its older verified snapshot.
    #[must_use]
    pub fn is_valid(&self, as_of: VerificationTimestamp) -> bool {
        self.latest_verified_event()
            .is_some_and(|event| !event.timestamp.is_stale_by(as_of, self.ttl_days))
    }

    /// Returns the expiry day anchored on the latest verified event.
    #[must_use]
    pub fn expiry_date(&self) -> Option<VerificationTimestamp> {
        self.latest_verified_event().map(|event| event.timestamp.expiry_date(self.ttl_days))
    }

    /// Returns the re-verification due day (expiry minus the warning window),
    /// anchored on the latest verified event.
    ///
    /// Shares its anchor with [`Self::is_re_verification_due`]: the predicate
    /// flips exactly when `as_of` reaches the day returned here.
    #[must_use]
    pub fn re_verification_due_date(&self, warning_days: u32) -> Option<VerificationTimestamp> {
        self.latest_verified_event()
            .map(|event| event.timestamp.reverification_due_date(self.ttl_days, warning_days))
    }

    /// Returns true iff `as_of` has reached the re-verification due day.
    #[must_use]
    pub fn is_re_verification_due(
        &self,
        as_of: VerificationTimestamp,
        warning_days: u32,
    ) -> bool {
        self.latest_verified_event().is_some_and(|event| {
            event.timestamp.days_until_reverification_due(as_of, self.ttl_days, warning_days) <= 0
        })
    }

    /// Returns true iff any conflicted event lies within the trailing
    /// [`CONFLICT_WINDOW_DAYS`] of `now`.
    #[must_use]
    pub fn has_recent_conflicts(&self, now: VerificationTimestamp) -> bool {
        self.events.iter().any(|event| {
            event.decision == VerificationDecision::Conflicted
                && !event.timestamp.is_stale_by(now, CONFLICT_WINDOW_DAYS)
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Returns the most recent verified-decision event, searching backward.
    fn latest_verified_event(&self) -> Option<&VerificationEvent> {
        self.events
            .iter()
            .rev()
            .find(|event| event.decision == VerificationDecision::Verified)
    }

    /// Returns the next event identifier (max existing id plus one).
    fn next_event_id(&self) -> EventId {
        self.events
            .iter()
            .map(|event| event.event_id)
            .max()
            .map_or(EventId::new(1), EventId::next)
    }

    /// Returns a new evidence value with the event appended.
    fn append(&self, event: VerificationEvent) -> Result<Self, EvidenceError> {
        let mut events = self.events.clone();
        events.push(event);
        Ok(Self {
            document_key: self.document_key.clone(),
            document_name: self.document_name.clone(),
            ttl_days: self.ttl_days,
            events,
        })
    }
}
