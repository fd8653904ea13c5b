// crates/launch-gate-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Launch Gate Rule Evaluator
// Description: Per-rule evaluation and listing-level aggregation.
// Purpose: Decide launch readiness from catalogs, evidence, and an explicit
//          evaluation instant.
// Dependencies: crate::{core, interfaces}, crate::runtime::applicability
// ============================================================================

//! ## Overview
//! The evaluator produces one outcome row per catalog rule: applicability
//! first, then evidence resolution, then a fixed-priority scan over the
//! resolved documents. Disqualification tiers are checked most severe first
//! (conflicted, stale, expired, re-verification-due) and ties within a tier
//! are broken by the rule's evidence-key declaration order. Only well-sourced
//! legal obligations ever block; everything else surfaces as warnings.
//!
//! Every entry point takes the evaluation instant explicitly. The evaluator
//! never reads the wall clock, so identical inputs always produce identical
//! results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ApplicabilityCatalog;
use crate::core::ConfidenceLevel;
use crate::core::ContentDigest;
use crate::core::DEFAULT_WARNING_DAYS;
use crate::core::DigestError;
use crate::core::DocumentStatus;
use crate::core::Evidence;
use crate::core::EvaluationSummary;
use crate::core::ISSUE_RULE_BLOCKING;
use crate::core::ISSUE_RULE_NOT_SATISFIED;
use crate::core::ISSUE_RULE_UNKNOWN;
use crate::core::Issue;
use crate::core::ListingEvaluationResult;
use crate::core::ListingInput;
use crate::core::RequirementType;
use crate::core::RuleCatalog;
use crate::core::RuleEvaluation;
use crate::core::RuleRecord;
use crate::core::RuleStatus;
use crate::core::ValidationVerdict;
use crate::core::VerificationEvent;
use crate::core::VerificationTimestamp;
use crate::interfaces::EvidenceRepository;
use crate::runtime::applicability::ApplicabilityState;
use crate::runtime::applicability::resolve_applicability;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Tunable evaluator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Days before expiry at which re-verification becomes due.
    pub warning_days: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            warning_days: DEFAULT_WARNING_DAYS,
        }
    }
}

// ============================================================================
// SECTION: Blocking Policy
// ============================================================================

/// Returns true when an unsatisfied rule may block launch.
///
/// Only legal obligations with at least medium confidence from an
/// authoritative source qualify; everything else is a warning.
#[must_use]
pub fn blockable(rule: &RuleRecord) -> bool {
    rule.requirement_type == RequirementType::Legal
        && rule.confidence != ConfidenceLevel::Low
        && rule.source_type.is_authoritative()
}

// ============================================================================
// SECTION: Rule Evaluator
// ============================================================================

/// Evaluates catalog rules against listings at an explicit instant.
///
/// # Invariants
/// - The catalog digest is computed once at construction and recorded on
///   every result produced by this evaluator.
#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    /// Compliance requirements under evaluation.
    rule_catalog: RuleCatalog,
    /// Conditional applicability entries.
    applicability_catalog: ApplicabilityCatalog,
    /// Tunable settings.
    config: EvaluatorConfig,
    /// Canonical digest of `rule_catalog`.
    catalog_digest: ContentDigest,
}

impl RuleEvaluator {
    /// Creates an evaluator over the given catalogs with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when the rule catalog cannot be canonicalized.
    pub fn new(
        rule_catalog: RuleCatalog,
        applicability_catalog: ApplicabilityCatalog,
    ) -> Result<Self, DigestError> {
        Self::with_config(rule_catalog, applicability_catalog, EvaluatorConfig::default())
    }

    /// Creates an evaluator with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when the rule catalog cannot be canonicalized.
    pub fn with_config(
        rule_catalog: RuleCatalog,
        applicability_catalog: ApplicabilityCatalog,
        config: EvaluatorConfig,
    ) -> Result<Self, DigestError> {
        let catalog_digest = rule_catalog.content_digest()?;
        Ok(Self {
            rule_catalog,
            applicability_catalog,
            config,
            catalog_digest,
        })
    }

    /// Returns the canonical digest of the rule catalog.
    #[must_use]
    pub const fn catalog_digest(&self) -> &ContentDigest {
        &self.catalog_digest
    }

    /// Evaluates one rule against one listing at `as_of`.
    pub fn evaluate_rule(
        &self,
        rule: &RuleRecord,
        listing: &ListingInput,
        repository: &dyn EvidenceRepository,
        as_of: VerificationTimestamp,
    ) -> RuleEvaluation {
        match resolve_applicability(&rule.rule_id, &listing.attributes, &self.applicability_catalog)
        {
            ApplicabilityState::NotApplicable => {
                return outcome_without_evidence(
                    rule,
                    RuleStatus::NotApplicable,
                    "rule does not apply to this listing",
                );
            }
            ApplicabilityState::Unknown => {
                return outcome_without_evidence(
                    rule,
                    RuleStatus::Unknown,
                    "applicability could not be determined",
                );
            }
            ApplicabilityState::Applicable => {}
        }

        if rule.required_evidence_keys.is_empty() {
            return outcome_without_evidence(rule, RuleStatus::Unknown, "no evidence keys");
        }

        let mut resolved: Vec<Evidence> = Vec::with_capacity(rule.required_evidence_keys.len());
        let mut missing: Vec<&str> = Vec::new();
        for key in &rule.required_evidence_keys {
            // Backend faults count as absent evidence; evaluation never fails.
            match repository.load(key, listing) {
                Ok(Some(evidence)) => resolved.push(evidence),
                Ok(None) | Err(_) => missing.push(key.as_str()),
            }
        }
        if !missing.is_empty() {
            let mut row = outcome_without_evidence(
                rule,
                RuleStatus::Missing,
                format!("missing evidence: {}", missing.join(", ")),
            );
            row.blocking = blockable(rule);
            return row;
        }

        self.scan_tiers(rule, &resolved, as_of)
    }

    /// Scans resolved evidence for the first match against the fixed
    /// disqualification tiers, most severe first.
    fn scan_tiers(
        &self,
        rule: &RuleRecord,
        resolved: &[Evidence],
        as_of: VerificationTimestamp,
    ) -> RuleEvaluation {
        /// Disqualification tiers, most severe first.
        const TIERS: [RuleStatus; 4] = [
            RuleStatus::Conflicted,
            RuleStatus::Stale,
            RuleStatus::Expired,
            RuleStatus::ReVerificationDue,
        ];
        for tier in TIERS {
            for evidence in resolved {
                if self.matches_tier(evidence, tier, as_of) {
                    return self.disqualified_outcome(rule, evidence, tier);
                }
            }
        }

        let trail: Vec<VerificationEvent> = resolved
            .iter()
            .flat_map(|evidence| evidence.audit_trail().iter().cloned())
            .collect();
        RuleEvaluation {
            rule_id: rule.rule_id.clone(),
            status: RuleStatus::Present,
            blocking: false,
            message: "all required evidence present".to_string(),
            requirement_type: rule.requirement_type,
            source_type: rule.source_type,
            confidence: rule.confidence,
            re_verification_due: None,
            audit_trail: Some(trail),
        }
    }

    /// Returns true when the evidence matches the given disqualification tier.
    fn matches_tier(
        &self,
        evidence: &Evidence,
        tier: RuleStatus,
        as_of: VerificationTimestamp,
    ) -> bool {
        let status = evidence.status(as_of);
        match tier {
            RuleStatus::Conflicted => status == DocumentStatus::Conflicted,
            RuleStatus::Stale => status == DocumentStatus::Stale,
            RuleStatus::Expired => status == DocumentStatus::Expired,
            RuleStatus::ReVerificationDue => {
                status == DocumentStatus::Present
                    && evidence.is_re_verification_due(as_of, self.config.warning_days)
            }
            _ => false,
        }
    }

    /// Builds the outcome row for a disqualified document.
    fn disqualified_outcome(
        &self,
        rule: &RuleRecord,
        evidence: &Evidence,
        tier: RuleStatus,
    ) -> RuleEvaluation {
        let (message, blocking, due) = match tier {
            RuleStatus::Conflicted => (
                format!("evidence `{}` has an unresolved conflict", evidence.document_key()),
                blockable(rule),
                None,
            ),
            RuleStatus::Stale => (
                format!("evidence `{}` was rejected at last verification", evidence.document_key()),
                blockable(rule),
                None,
            ),
            RuleStatus::Expired => (
                format!("evidence `{}` is past its validity window", evidence.document_key()),
                blockable(rule),
                evidence.expiry_date(),
            ),
            _ => (
                format!("evidence `{}` is due for re-verification", evidence.document_key()),
                false,
                evidence.re_verification_due_date(self.config.warning_days),
            ),
        };
        RuleEvaluation {
            rule_id: rule.rule_id.clone(),
            status: tier,
            blocking,
            message,
            requirement_type: rule.requirement_type,
            source_type: rule.source_type,
            confidence: rule.confidence,
            re_verification_due: due,
            audit_trail: Some(evidence.audit_trail().to_vec()),
        }
    }

    /// Evaluates every catalog rule against one listing and aggregates the
    /// rows into a verdict and summary.
    pub fn evaluate_listing(
        &self,
        listing: &ListingInput,
        repository: &dyn EvidenceRepository,
        as_of: VerificationTimestamp,
    ) -> ListingEvaluationResult {
        let mut evaluations = Vec::with_capacity(self.rule_catalog.rules.len());
        let mut summary = EvaluationSummary::default();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for rule in &self.rule_catalog.rules {
            let row = self.evaluate_rule(rule, listing, repository, as_of);
            summary.record(&row);
            if row.blocking {
                errors.push(Issue::for_rule(
                    ISSUE_RULE_BLOCKING,
                    row.message.clone(),
                    row.rule_id.clone(),
                ));
            } else if row.status == RuleStatus::Unknown {
                warnings.push(Issue::for_rule(
                    ISSUE_RULE_UNKNOWN,
                    row.message.clone(),
                    row.rule_id.clone(),
                ));
            } else if row.status != RuleStatus::Present {
                warnings.push(Issue::for_rule(
                    ISSUE_RULE_NOT_SATISFIED,
                    row.message.clone(),
                    row.rule_id.clone(),
                ));
            }
            evaluations.push(row);
        }

        ListingEvaluationResult {
            listing_id: listing.listing_id.clone(),
            evaluations,
            summary,
            verdict: ValidationVerdict::new(errors, warnings),
            catalog_digest: self.catalog_digest.clone(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a non-blocking outcome row that involved no evidence documents.
fn outcome_without_evidence(
    rule: &RuleRecord,
    status: RuleStatus,
    message: impl Into<String>,
) -> RuleEvaluation {
    RuleEvaluation {
        rule_id: rule.rule_id.clone(),
        status,
        blocking: false,
        message: message.into(),
        requirement_type: rule.requirement_type,
        source_type: rule.source_type,
        confidence: rule.confidence,
        re_verification_due: None,
        audit_trail: None,
    }
}
