// crates/launch-gate-core/src/runtime/applicability.rs
// ============================================================================
// Module: Launch Gate Applicability Resolution
// Description: Tri-state applicability resolution for catalog rules.
// Purpose: Decide whether a rule applies to a listing, deterministically.
// Dependencies: crate::core, crate::runtime::tokens, tri-logic
// ============================================================================

//! ## Overview
//! Applicability resolution is a pure function of a rule identifier, listing
//! attributes, and the applicability catalog. Absence of any scoped entry
//! means the rule applies (open-world assumption). Entry conditions use
//! Bochvar conjunction: one unresolvable token poisons the whole condition
//! into an unknown contribution instead of collapsing it to false.
//!
//! Catalog entry order is a contract: the first firing exclusion entry
//! short-circuits the rule to not-applicable before later entries are seen.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use tri_logic::BochvarLogic;
use tri_logic::TriLogic;
use tri_logic::TriState;

use crate::core::ApplicabilityCatalog;
use crate::core::ListingAttributes;
use crate::core::RuleId;
use crate::runtime::tokens::resolve_token;

// ============================================================================
// SECTION: Applicability State
// ============================================================================

/// Whether a rule applies to a listing.
///
/// # Invariants
/// - Variants are stable for serialization and outcome mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicabilityState {
    /// The rule applies.
    Applicable,
    /// The rule does not apply.
    NotApplicable,
    /// Applicability could not be determined.
    Unknown,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves whether a rule applies to a listing.
///
/// A rule with no scoped catalog entries is applicable by default. Otherwise,
/// entries are scanned in catalog order: a firing entry with only
/// `then_not_applies` assertions short-circuits to `NotApplicable`
/// immediately; a firing entry with `then_applies` assertions marks the rule
/// applicable; entries with unresolvable condition tokens contribute
/// `Unknown` when nothing fired affirmatively.
#[must_use]
pub fn resolve_applicability(
    rule_id: &RuleId,
    attributes: &ListingAttributes,
    catalog: &ApplicabilityCatalog,
) -> ApplicabilityState {
    let mut scoped = false;
    let mut has_match_apply = false;
    let mut has_unknown = false;

    for entry in catalog.entries_for(rule_id) {
        scoped = true;
        let condition = BochvarLogic
            .all(entry.if_tokens.iter().map(|token| resolve_token(token, attributes)));
        match condition {
            TriState::Undefined => has_unknown = true,
            TriState::True => {
                if !entry.then_not_applies.is_empty() && entry.then_applies.is_empty() {
                    return ApplicabilityState::NotApplicable;
                }
                if !entry.then_applies.is_empty() {
                    has_match_apply = true;
                }
            }
            TriState::False => {}
        }
    }

    if !scoped {
        return ApplicabilityState::Applicable;
    }
    if has_match_apply {
        return ApplicabilityState::Applicable;
    }
    if has_unknown {
        return ApplicabilityState::Unknown;
    }
    ApplicabilityState::NotApplicable
}
