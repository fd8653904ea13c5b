// crates/launch-gate-core/src/core/mod.rs
// ============================================================================
// Module: Launch Gate Core Types
// Description: Domain types for evidence, catalogs, listings, and outcomes.
// Purpose: Provide the canonical data model shared by the runtime.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! Core types are plain serializable data with constructor-enforced
//! invariants. Time is always explicit; nothing in this module reads a clock.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod digest;
pub mod event;
pub mod evidence;
pub mod identifiers;
pub mod listing;
pub mod outcome;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ApplicabilityCatalog;
pub use catalog::ApplicabilityRule;
pub use catalog::RequirementType;
pub use catalog::RuleCatalog;
pub use catalog::RuleRecord;
pub use catalog::SourceType;
pub use digest::ContentDigest;
pub use digest::DigestError;
pub use event::ConfidenceLevel;
pub use event::EventError;
pub use event::VerificationDecision;
pub use event::VerificationEvent;
pub use evidence::CONFLICT_WINDOW_DAYS;
pub use evidence::DocumentStatus;
pub use evidence::Evidence;
pub use evidence::EvidenceError;
pub use evidence::REASON_CREATED;
pub use evidence::REASON_REVERIFIED;
pub use identifiers::DocumentKey;
pub use identifiers::EventId;
pub use identifiers::ListingId;
pub use identifiers::RuleId;
pub use listing::EventSourcedDoc;
pub use listing::LegacyDoc;
pub use listing::LegacyStatus;
pub use listing::ListingAttributes;
pub use listing::ListingInput;
pub use listing::RawEvidenceDoc;
pub use outcome::EvaluationSummary;
pub use outcome::ISSUE_RULE_BLOCKING;
pub use outcome::ISSUE_RULE_NOT_SATISFIED;
pub use outcome::ISSUE_RULE_UNKNOWN;
pub use outcome::Issue;
pub use outcome::ListingEvaluationResult;
pub use outcome::RuleEvaluation;
pub use outcome::RuleStatus;
pub use outcome::ValidationVerdict;
pub use time::DEFAULT_WARNING_DAYS;
pub use time::TimestampError;
pub use time::VerificationTimestamp;
