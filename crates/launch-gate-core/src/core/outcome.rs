// crates/launch-gate-core/src/core/outcome.rs
// ============================================================================
// Module: Launch Gate Evaluation Outcomes
// Description: Per-rule outcome rows, verdicts, and summary counts.
// Purpose: Capture evaluation output as data for callers and audit trails.
// Dependencies: crate::core::{catalog, digest, event, identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Evaluation output is pure data: one outcome row per rule, a per-status
//! summary, and a verdict splitting rows into blocking errors and warnings.
//! Domain-rule violations are never raised as faults; they are returned here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::catalog::RequirementType;
use crate::core::catalog::SourceType;
use crate::core::digest::ContentDigest;
use crate::core::event::ConfidenceLevel;
use crate::core::event::VerificationEvent;
use crate::core::identifiers::ListingId;
use crate::core::identifiers::RuleId;
use crate::core::time::VerificationTimestamp;

// ============================================================================
// SECTION: Rule Status
// ============================================================================

/// Status of one rule for one listing.
///
/// # Invariants
/// - Variants are stable for serialization and summary counting.
/// - Disqualification severity (most severe first): conflicted, stale,
///   expired, re-verification-due; the evaluator scans tiers in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// Rule does not apply to this listing.
    NotApplicable,
    /// Applicability or evidence requirements could not be determined.
    Unknown,
    /// One or more required evidence documents are absent.
    Missing,
    /// A required document's latest event is a conflict.
    Conflicted,
    /// A required document's latest event is a rejection.
    Stale,
    /// A required document is verified but past TTL.
    Expired,
    /// A required document has entered its re-verification warning window.
    ReVerificationDue,
    /// All required evidence is present and fresh.
    Present,
}

// ============================================================================
// SECTION: Outcome Rows
// ============================================================================

/// Outcome row for one rule against one listing.
///
/// # Invariants
/// - `blocking` is true only for well-sourced legal obligations (§ blockable
///   policy); warnings never block launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    /// Rule identifier.
    pub rule_id: RuleId,
    /// Derived rule status.
    pub status: RuleStatus,
    /// Whether this row prevents launch.
    pub blocking: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Requirement category of the rule.
    pub requirement_type: RequirementType,
    /// Provenance of the rule.
    pub source_type: SourceType,
    /// Confidence of the rule record.
    pub confidence: ConfidenceLevel,
    /// Re-verification due day, when the status warrants one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub re_verification_due: Option<VerificationTimestamp>,
    /// Ordered event history backing this outcome, when evidence was involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_trail: Option<Vec<VerificationEvent>>,
}

// ============================================================================
// SECTION: Issues and Verdicts
// ============================================================================

/// Issue code for rows that block launch.
pub const ISSUE_RULE_BLOCKING: &str = "RULE_BLOCKING";
/// Issue code for rows whose requirements could not be determined.
pub const ISSUE_RULE_UNKNOWN: &str = "RULE_UNKNOWN";
/// Issue code for non-blocking rows that are not satisfied.
pub const ISSUE_RULE_NOT_SATISFIED: &str = "RULE_NOT_SATISFIED";

/// One structured issue emitted by evaluation or policy checks.
///
/// # Invariants
/// - `code` is a stable identifier for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable issue code.
    pub code: String,
    /// Human-readable issue message.
    pub message: String,
    /// Rule the issue refers to, when applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<RuleId>,
}

impl Issue {
    /// Creates an issue with the provided code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            rule_id: None,
        }
    }

    /// Creates an issue scoped to a rule.
    #[must_use]
    pub fn for_rule(code: impl Into<String>, message: impl Into<String>, rule_id: RuleId) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            rule_id: Some(rule_id),
        }
    }
}

/// Validation verdict: overall validity plus split issues.
///
/// # Invariants
/// - `valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    /// True when no blocking issue is present.
    pub valid: bool,
    /// Blocking issues.
    pub errors: Vec<Issue>,
    /// Non-blocking issues.
    pub warnings: Vec<Issue>,
}

impl ValidationVerdict {
    /// Creates a verdict from split issues, deriving `valid`.
    #[must_use]
    pub fn new(errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

// ============================================================================
// SECTION: Summary Counts
// ============================================================================

/// Exact per-status counts over one listing evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EvaluationSummary {
    /// Rows with status `not_applicable`.
    pub not_applicable: usize,
    /// Rows with status `unknown`.
    pub unknown: usize,
    /// Rows with status `missing`.
    pub missing: usize,
    /// Rows with status `conflicted`.
    pub conflicted: usize,
    /// Rows with status `stale`.
    pub stale: usize,
    /// Rows with status `expired`.
    pub expired: usize,
    /// Rows with status `re_verification_due`.
    pub re_verification_due: usize,
    /// Rows with status `present`.
    pub present: usize,
    /// Total number of rows.
    pub total: usize,
    /// Number of blocking rows.
    pub blocking_issues: usize,
}

impl EvaluationSummary {
    /// Records one outcome row into the summary counts.
    pub fn record(&mut self, evaluation: &RuleEvaluation) {
        match evaluation.status {
            RuleStatus::NotApplicable => self.not_applicable += 1,
            RuleStatus::Unknown => self.unknown += 1,
            RuleStatus::Missing => self.missing += 1,
            RuleStatus::Conflicted => self.conflicted += 1,
            RuleStatus::Stale => self.stale += 1,
            RuleStatus::Expired => self.expired += 1,
            RuleStatus::ReVerificationDue => self.re_verification_due += 1,
            RuleStatus::Present => self.present += 1,
        }
        self.total += 1;
        if evaluation.blocking {
            self.blocking_issues += 1;
        }
    }
}

// ============================================================================
// SECTION: Listing Evaluation Result
// ============================================================================

/// Full evaluation output for one listing against one rule catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEvaluationResult {
    /// Listing identifier.
    pub listing_id: ListingId,
    /// One outcome row per catalog rule, in catalog order.
    pub evaluations: Vec<RuleEvaluation>,
    /// Exact per-status counts.
    pub summary: EvaluationSummary,
    /// Verdict derived from the outcome rows.
    pub verdict: ValidationVerdict,
    /// Digest of the rule catalog the result was produced against.
    pub catalog_digest: ContentDigest,
}
