// crates/launch-gate-core/src/core/catalog.rs
// ============================================================================
// Module: Launch Gate Catalogs
// Description: Rule and applicability catalog records.
// Purpose: Carry jurisdiction requirements and conditional applicability logic.
// Dependencies: crate::core::{digest, event, identifiers, time}, serde
// ============================================================================

//! ## Overview
//! The rule catalog lists jurisdiction/channel compliance requirements; the
//! applicability catalog maps listing attributes onto whether a rule applies.
//! Entry order inside the applicability catalog is significant: the first
//! firing exclusion entry short-circuits a rule to not-applicable, so both
//! catalogs preserve their input ordering exactly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::digest::ContentDigest;
use crate::core::digest::DigestError;
use crate::core::event::ConfidenceLevel;
use crate::core::identifiers::DocumentKey;
use crate::core::identifiers::RuleId;
use crate::core::time::VerificationTimestamp;

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Category of a compliance requirement.
///
/// # Invariants
/// - Variants are stable for serialization and blocking-policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    /// Legal obligation (directive, regulation, national law).
    Legal,
    /// Marketplace policy requirement.
    Marketplace,
    /// Non-binding recommendation.
    BestPractice,
}

/// Provenance of a rule record.
///
/// # Invariants
/// - Variants are stable for serialization and blocking-policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// EUR-Lex (EU law database).
    Eurlex,
    /// Another official EU source.
    EuOfficial,
    /// A national authority.
    NationalAuthority,
    /// Official Amazon documentation.
    AmazonOfficial,
    /// A secondary, non-authoritative source.
    Secondary,
}

impl SourceType {
    /// Returns true when the source is authoritative enough to block launch.
    #[must_use]
    pub const fn is_authoritative(self) -> bool {
        matches!(self, Self::Eurlex | Self::EuOfficial | Self::NationalAuthority)
    }
}

// ============================================================================
// SECTION: Rule Records
// ============================================================================

/// One jurisdiction/channel compliance requirement.
///
/// # Invariants
/// - `required_evidence_keys` preserves declaration order; ties within an
///   evaluation tier are broken by this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Rule identifier.
    pub rule_id: RuleId,
    /// Jurisdiction the rule belongs to.
    pub jurisdiction: String,
    /// Sales channel the rule applies to.
    pub channel: String,
    /// Requirement category.
    pub requirement_type: RequirementType,
    /// Evidence document keys the rule requires (possibly empty).
    #[serde(default)]
    pub required_evidence_keys: Vec<DocumentKey>,
    /// Provenance of the rule.
    pub source_type: SourceType,
    /// Confidence in the rule record itself.
    pub confidence: ConfidenceLevel,
    /// Day the rule record was last verified.
    pub verified_at: VerificationTimestamp,
}

/// Versioned collection of compliance requirements.
///
/// # Invariants
/// - Rule order is preserved from the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCatalog {
    /// Catalog revision label.
    pub version: String,
    /// Ordered rule records.
    pub rules: Vec<RuleRecord>,
}

impl RuleCatalog {
    /// Computes the canonical content digest of this catalog.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when canonicalization fails.
    pub fn content_digest(&self) -> Result<ContentDigest, DigestError> {
        ContentDigest::of(self)
    }
}

// ============================================================================
// SECTION: Applicability Records
// ============================================================================

/// One conditional applicability entry scoped to a rule.
///
/// # Invariants
/// - `if_tokens` must all hold for the entry to fire; an unresolvable token
///   makes the entry an unknown contribution instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicabilityRule {
    /// Rule this entry is scoped to.
    pub rule_id: RuleId,
    /// Condition tokens; all must resolve true for the entry to fire.
    #[serde(default, rename = "if")]
    pub if_tokens: Vec<String>,
    /// Tokens asserted applicable when the entry fires.
    #[serde(default)]
    pub then_applies: Vec<String>,
    /// Tokens asserted not applicable when the entry fires.
    #[serde(default)]
    pub then_not_applies: Vec<String>,
    /// Confidence in the applicability entry.
    pub confidence: ConfidenceLevel,
    /// Day the entry was last verified.
    pub verified_at: VerificationTimestamp,
}

/// Ordered collection of applicability entries.
///
/// # Invariants
/// - Entry order is preserved from the source document; the not-applicable
///   short-circuit depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApplicabilityCatalog {
    /// Ordered applicability entries.
    pub entries: Vec<ApplicabilityRule>,
}

impl ApplicabilityCatalog {
    /// Returns the entries scoped to a rule, in catalog order.
    pub fn entries_for<'a>(
        &'a self,
        rule_id: &'a RuleId,
    ) -> impl Iterator<Item = &'a ApplicabilityRule> {
        self.entries.iter().filter(move |entry| &entry.rule_id == rule_id)
    }
}
