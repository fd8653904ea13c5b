// crates/launch-gate-core/src/runtime/policy.rs
// ============================================================================
// Module: Launch Gate Content Policy
// Description: Structural checks over generated product content.
// Purpose: Validate generated content against a fixed policy.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! The content policy check is deliberately simple: a handful of structural
//! constraints over generated product content, evaluated in one pass with no
//! state machine. Violations come back as the same issue shape the rule
//! evaluator emits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::ConfidenceLevel;
use crate::core::Issue;
use crate::core::ValidationVerdict;

// ============================================================================
// SECTION: Issue Codes
// ============================================================================

/// Issue code for content in a disallowed category.
pub const ISSUE_CATEGORY_NOT_ALLOWED: &str = "CONTENT_CATEGORY_NOT_ALLOWED";
/// Issue code for content below the minimum confidence.
pub const ISSUE_CONFIDENCE_TOO_LOW: &str = "CONTENT_CONFIDENCE_TOO_LOW";
/// Issue code for content from the wrong source for its category.
pub const ISSUE_SOURCE_NOT_ALLOWED: &str = "CONTENT_SOURCE_NOT_ALLOWED";
/// Issue code for content exceeding the claim budget.
pub const ISSUE_TOO_MANY_CLAIMS: &str = "CONTENT_TOO_MANY_CLAIMS";

// ============================================================================
// SECTION: Policy and Content
// ============================================================================

/// Constraints applied to generated product content.
///
/// # Invariants
/// - An empty `allowed_categories` set allows no categories at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPolicy {
    /// Categories generated content may belong to.
    pub allowed_categories: BTreeSet<String>,
    /// Minimum confidence generated content must carry.
    pub min_confidence: ConfidenceLevel,
    /// Required source per category; categories without an entry accept any.
    #[serde(default)]
    pub required_sources: BTreeMap<String, String>,
    /// Maximum number of claims one content item may make.
    pub max_claims: usize,
}

/// One item of generated product content under policy review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Content category.
    pub category: String,
    /// Source the content was derived from.
    pub source: String,
    /// Confidence attached to the content.
    pub confidence: ConfidenceLevel,
    /// Factual claims the content makes.
    #[serde(default)]
    pub claims: Vec<String>,
}

impl ContentPolicy {
    /// Checks one content item against this policy.
    ///
    /// Violations are returned as data; the check never fails.
    #[must_use]
    pub fn check(&self, content: &GeneratedContent) -> ValidationVerdict {
        let mut errors = Vec::new();

        if !self.allowed_categories.contains(&content.category) {
            errors.push(Issue::new(
                ISSUE_CATEGORY_NOT_ALLOWED,
                format!("category `{}` is not allowed", content.category),
            ));
        }
        if !content.confidence.at_least(self.min_confidence) {
            errors.push(Issue::new(
                ISSUE_CONFIDENCE_TOO_LOW,
                "content confidence is below the required minimum",
            ));
        }
        if let Some(required) = self.required_sources.get(&content.category)
            && required != &content.source
        {
            errors.push(Issue::new(
                ISSUE_SOURCE_NOT_ALLOWED,
                format!(
                    "category `{}` requires source `{required}`, got `{}`",
                    content.category, content.source
                ),
            ));
        }
        if content.claims.len() > self.max_claims {
            errors.push(Issue::new(
                ISSUE_TOO_MANY_CLAIMS,
                format!(
                    "content makes {} claims, at most {} allowed",
                    content.claims.len(),
                    self.max_claims
                ),
            ));
        }

        ValidationVerdict::new(errors, Vec::new())
    }
}
