// crates/launch-gate-core/src/core/event.rs
// ============================================================================
// Module: Launch Gate Verification Events
// Description: Immutable verification decision records.
// Purpose: Capture single verification decisions for append-only evidence logs.
// Dependencies: crate::core::{identifiers, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! A verification event records one immutable decision about a proof document:
//! who decided, when, what was decided, and with what confidence. Events are
//! never altered after construction; evidence histories only ever append.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::EventId;
use crate::core::time::VerificationTimestamp;

// ============================================================================
// SECTION: Decisions and Confidence
// ============================================================================

/// Outcome of one verification decision.
///
/// # Invariants
/// - Variants are stable for serialization and status derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationDecision {
    /// The document was inspected and found valid.
    Verified,
    /// The document was inspected and found invalid.
    Rejected,
    /// Two auditors disagreed about the document.
    Conflicted,
}

/// Confidence attached to a verification decision or catalog entry.
///
/// # Invariants
/// - Variants are stable for serialization and blocking-policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// High confidence.
    High,
    /// Medium confidence.
    Medium,
    /// Low confidence.
    Low,
}

impl ConfidenceLevel {
    /// Returns true when this level is at least as confident as `floor`.
    #[must_use]
    pub const fn at_least(self, floor: Self) -> bool {
        self.rank() >= floor.rank()
    }

    /// Returns the confidence ordering (higher is more confident).
    const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing verification events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Verifier identity was empty or whitespace-only.
    #[error("verification event requires a non-empty verifier")]
    EmptyVerifier,
    /// Decision reason was empty or whitespace-only.
    #[error("verification event requires a non-empty reason")]
    EmptyReason,
}

// ============================================================================
// SECTION: Verification Event
// ============================================================================

/// One immutable verification decision record.
///
/// # Invariants
/// - `event_id` is unique within the owning evidence's lifetime and is
///   carried through serialization rather than regenerated.
/// - `verifier` and `reason` are non-empty.
/// - Fields never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEvent {
    /// Event identifier, stable across round-trips.
    pub event_id: EventId,
    /// Day the decision was made.
    pub timestamp: VerificationTimestamp,
    /// Decision outcome.
    pub decision: VerificationDecision,
    /// Identity of the verifier (or joined identities for conflicts).
    pub verifier: String,
    /// Reason recorded with the decision.
    pub reason: String,
    /// Confidence attached to the decision.
    pub confidence: ConfidenceLevel,
}

impl VerificationEvent {
    /// Creates a verification event, validating verifier and reason.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when the verifier or reason is empty.
    pub fn new(
        event_id: EventId,
        timestamp: VerificationTimestamp,
        decision: VerificationDecision,
        verifier: impl Into<String>,
        reason: impl Into<String>,
        confidence: ConfidenceLevel,
    ) -> Result<Self, EventError> {
        let verifier = verifier.into();
        if verifier.trim().is_empty() {
            return Err(EventError::EmptyVerifier);
        }
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(EventError::EmptyReason);
        }
        Ok(Self {
            event_id,
            timestamp,
            decision,
            verifier,
            reason,
            confidence,
        })
    }
}
