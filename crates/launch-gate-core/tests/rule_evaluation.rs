// crates/launch-gate-core/tests/rule_evaluation.rs
// ============================================================================
// Module: Rule Evaluation Tests
// Description: Tests for per-rule evaluation and the blocking policy.
// Purpose: Validate tier priority, declaration-order tie-breaks, and blocking.
// Dependencies: launch_gate_core::runtime::evaluator
// ============================================================================
//! ## Overview
//! Validates the per-rule evaluation algorithm: the fixed disqualification
//! tier order, the evidence-key declaration-order tie-break, and the policy
//! that only well-sourced legal obligations block launch.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::collections::BTreeMap;

use launch_gate_core::ApplicabilityCatalog;
use launch_gate_core::ConfidenceLevel;
use launch_gate_core::EventId;
use launch_gate_core::EventSourcedDoc;
use launch_gate_core::ListingEvidenceRepository;
use launch_gate_core::ListingId;
use launch_gate_core::ListingInput;
use launch_gate_core::RawEvidenceDoc;
use launch_gate_core::RuleCatalog;
use launch_gate_core::RuleEvaluator;
use launch_gate_core::RuleRecord;
use launch_gate_core::RuleStatus;
use launch_gate_core::SourceType;
use launch_gate_core::VerificationDecision;
use launch_gate_core::VerificationEvent;
use launch_gate_core::VerificationTimestamp;
use launch_gate_core::blockable;
use support::TestResult;
use support::day_2025;
use support::ensure;
use support::legal_rule;
use support::marketplace_rule;

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds one embedded event-sourced evidence document.
fn doc(
    ttl_days: u32,
    events: Vec<(u64, VerificationDecision, VerificationTimestamp)>,
) -> TestResult<RawEvidenceDoc> {
    let events = events
        .into_iter()
        .map(|(id, decision, timestamp)| {
            VerificationEvent::new(
                EventId::new(id),
                timestamp,
                decision,
                "auditor_a",
                "recorded",
                ConfidenceLevel::High,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawEvidenceDoc::EventSourced(EventSourcedDoc {
        document_name: None,
        ttl_days,
        verification_events: events,
    }))
}

/// Builds a listing with the given embedded evidence documents.
fn listing(evidence: BTreeMap<String, RawEvidenceDoc>) -> ListingInput {
    ListingInput {
        listing_id: ListingId::new("listing-1"),
        attributes: launch_gate_core::ListingAttributes::default(),
        evidence,
    }
}

/// Builds an evaluator over the given rules with no applicability entries.
fn evaluator(rules: Vec<RuleRecord>) -> TestResult<RuleEvaluator> {
    Ok(RuleEvaluator::new(
        RuleCatalog {
            version: "2025-01".to_string(),
            rules,
        },
        ApplicabilityCatalog::default(),
    )?)
}

// ============================================================================
// SECTION: Tier Priority Tests
// ============================================================================

/// Tests that the conflicted tier beats expired regardless of key order.
#[test]
fn test_conflicted_tier_beats_expired() -> TestResult {
    let rule = legal_rule("lvd_doc", &["doc_a", "doc_b"]);
    // doc_a (declared first) is expired; doc_b is conflicted.
    let mut evidence = BTreeMap::new();
    evidence.insert(
        "doc_a".to_string(),
        doc(30, vec![(1, VerificationDecision::Verified, day_2025(1, 1))])?,
    );
    evidence.insert(
        "doc_b".to_string(),
        doc(365, vec![(1, VerificationDecision::Conflicted, day_2025(5, 1))])?,
    );
    let listing = listing(evidence);
    let repository = ListingEvidenceRepository::new();

    let row = evaluator(vec![rule.clone()])?.evaluate_rule(
        &rule,
        &listing,
        &repository,
        day_2025(6, 1),
    );
    ensure(row.status == RuleStatus::Conflicted, "conflicted outranks expired")?;
    ensure(row.message.contains("doc_b"), "the conflicted document supplies the message")?;
    ensure(row.blocking, "a conflicted legal rule from eurlex blocks")?;
    Ok(())
}

/// Tests the declaration-order tie-break within one tier.
#[test]
fn test_declaration_order_breaks_ties() -> TestResult {
    let rule = legal_rule("lvd_doc", &["doc_a", "doc_b"]);
    // Both documents are rejected; doc_a is declared first and must win.
    let mut evidence = BTreeMap::new();
    evidence.insert(
        "doc_a".to_string(),
        doc(365, vec![(1, VerificationDecision::Rejected, day_2025(5, 1))])?,
    );
    evidence.insert(
        "doc_b".to_string(),
        doc(365, vec![(1, VerificationDecision::Rejected, day_2025(4, 1))])?,
    );
    let listing = listing(evidence);
    let repository = ListingEvidenceRepository::new();

    let row = evaluator(vec![rule.clone()])?.evaluate_rule(
        &rule,
        &listing,
        &repository,
        day_2025(6, 1),
    );
    ensure(row.status == RuleStatus::Stale, "a rejected document reads stale")?;
    ensure(row.message.contains("doc_a"), "the first declared key wins the tie")?;
    Ok(())
}

/// Tests the re-verification-due tier and its non-blocking nature.
#[test]
fn test_re_verification_due_never_blocks() -> TestResult {
    let rule = legal_rule("lvd_doc", &["doc_a"]);
    // Verified 300 days before the evaluation instant with ttl 365: inside
    // the default 90-day warning window but not expired.
    let mut evidence = BTreeMap::new();
    evidence.insert(
        "doc_a".to_string(),
        doc(365, vec![(1, VerificationDecision::Verified, day_2025(1, 1))])?,
    );
    let listing = listing(evidence);
    let repository = ListingEvidenceRepository::new();
    let as_of = day_2025(1, 1).expiry_date(300);

    let row = evaluator(vec![rule.clone()])?.evaluate_rule(&rule, &listing, &repository, as_of);
    ensure(row.status == RuleStatus::ReVerificationDue, "day 300 of 365 is inside the window")?;
    ensure(!row.blocking, "an early warning must never block launch")?;
    ensure(row.re_verification_due.is_some(), "the due date is reported")?;
    Ok(())
}

/// Tests the present outcome and its concatenated audit trail.
#[test]
fn test_present_concatenates_audit_trails() -> TestResult {
    let rule = legal_rule("lvd_doc", &["doc_a", "doc_b"]);
    let mut evidence = BTreeMap::new();
    evidence.insert(
        "doc_a".to_string(),
        doc(365, vec![(1, VerificationDecision::Verified, day_2025(5, 1))])?,
    );
    evidence.insert(
        "doc_b".to_string(),
        doc(
            365,
            vec![
                (1, VerificationDecision::Verified, day_2025(4, 1)),
                (2, VerificationDecision::Verified, day_2025(5, 1)),
            ],
        )?,
    );
    let listing = listing(evidence);
    let repository = ListingEvidenceRepository::new();

    let row = evaluator(vec![rule.clone()])?.evaluate_rule(
        &rule,
        &listing,
        &repository,
        day_2025(6, 1),
    );
    ensure(row.status == RuleStatus::Present, "fresh documents satisfy the rule")?;
    ensure(!row.blocking, "a satisfied rule never blocks")?;
    let trail = row.audit_trail.ok_or("missing audit trail")?;
    ensure(trail.len() == 3, "the trail concatenates all involved histories")?;
    Ok(())
}

// ============================================================================
// SECTION: Missing and Unknown Tests
// ============================================================================

/// Tests the missing outcome and case-insensitive key matching.
#[test]
fn test_missing_evidence_lists_keys() -> TestResult {
    let rule = legal_rule("lvd_doc", &["doc_a", "doc_b"]);
    // Submitted under different casing: doc_a must still resolve.
    let mut evidence = BTreeMap::new();
    evidence.insert(
        "DOC_A".to_string(),
        doc(365, vec![(1, VerificationDecision::Verified, day_2025(5, 1))])?,
    );
    let listing = listing(evidence);
    let repository = ListingEvidenceRepository::new();

    let row = evaluator(vec![rule.clone()])?.evaluate_rule(
        &rule,
        &listing,
        &repository,
        day_2025(6, 1),
    );
    ensure(row.status == RuleStatus::Missing, "an absent required key reads missing")?;
    ensure(
        row.message.contains("doc_b") && !row.message.contains("doc_a"),
        "only the truly absent keys are listed",
    )?;
    ensure(row.blocking, "missing evidence for a blockable rule blocks")?;
    Ok(())
}

/// Tests the no-evidence-keys edge.
#[test]
fn test_rule_without_keys_is_unknown() -> TestResult {
    let rule = legal_rule("lvd_doc", &[]);
    let listing = listing(BTreeMap::new());
    let repository = ListingEvidenceRepository::new();

    let row = evaluator(vec![rule.clone()])?.evaluate_rule(
        &rule,
        &listing,
        &repository,
        day_2025(6, 1),
    );
    ensure(row.status == RuleStatus::Unknown, "a rule without keys cannot be checked")?;
    ensure(!row.blocking, "an uncheckable rule must not block")?;
    ensure(row.message == "no evidence keys", "the message names the edge")?;
    Ok(())
}

// ============================================================================
// SECTION: Blocking Policy Tests
// ============================================================================

/// Tests the blockable policy boundaries.
#[test]
fn test_blockable_policy() -> TestResult {
    ensure(blockable(&legal_rule("r1", &[])), "high-confidence eurlex legal rules block")?;
    ensure(
        !blockable(&marketplace_rule("r2", &[])),
        "marketplace rules are warnings only",
    )?;

    let low_confidence = RuleRecord {
        confidence: ConfidenceLevel::Low,
        ..legal_rule("r3", &[])
    };
    ensure(!blockable(&low_confidence), "low-confidence rules never block")?;

    let secondary_source = RuleRecord {
        source_type: SourceType::Secondary,
        ..legal_rule("r4", &[])
    };
    ensure(!blockable(&secondary_source), "secondary sources never block")?;
    Ok(())
}
