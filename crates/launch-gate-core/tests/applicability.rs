// crates/launch-gate-core/tests/applicability.rs
// ============================================================================
// Module: Applicability Tests
// Description: Tests for token resolution and the applicability resolver.
// Purpose: Validate tri-state token semantics and short-circuit ordering.
// Dependencies: launch_gate_core::runtime::{applicability, tokens}
// ============================================================================
//! ## Overview
//! Validates compliance-token resolution (including the undefined voltage
//! edge) and the ordered not-applicable short-circuit of the resolver.

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

use launch_gate_core::ApplicabilityCatalog;
use launch_gate_core::ApplicabilityRule;
use launch_gate_core::ConfidenceLevel;
use launch_gate_core::ListingAttributes;
use launch_gate_core::RuleId;
use launch_gate_core::resolve_token;
use launch_gate_core::runtime::ApplicabilityState;
use launch_gate_core::runtime::resolve_applicability;
use support::TestResult;
use support::day_2025;
use support::ensure;
use tri_logic::TriState;

/// Builds a catalog entry scoped to `rule_id`.
fn entry(rule_id: &str, if_tokens: &[&str], applies: &[&str], not_applies: &[&str]) -> ApplicabilityRule {
    ApplicabilityRule {
        rule_id: RuleId::new(rule_id),
        if_tokens: if_tokens.iter().map(ToString::to_string).collect(),
        then_applies: applies.iter().map(ToString::to_string).collect(),
        then_not_applies: not_applies.iter().map(ToString::to_string).collect(),
        confidence: ConfidenceLevel::High,
        verified_at: day_2025(1, 1),
    }
}

// ============================================================================
// SECTION: Token Resolution Tests
// ============================================================================

/// Tests boolean token resolution.
#[test]
fn test_boolean_tokens_resolve_from_attributes() -> TestResult {
    let attributes = ListingAttributes {
        is_radio_equipment: true,
        ..ListingAttributes::default()
    };
    ensure(
        resolve_token("is_radio_equipment", &attributes) == TriState::True,
        "a set flag resolves true",
    )?;
    ensure(
        resolve_token("is_emc_relevant", &attributes) == TriState::False,
        "an unset flag resolves false",
    )?;
    Ok(())
}

/// Tests that unrecognized token names resolve undefined, never false.
#[test]
fn test_unknown_token_resolves_undefined() -> TestResult {
    let attributes = ListingAttributes::default();
    ensure(
        resolve_token("is_misspelled_token", &attributes) == TriState::Undefined,
        "a catalog typo must surface as undefined",
    )
}

/// Tests the voltage-range token including the no-rating edge.
#[test]
fn test_lvd_voltage_token() -> TestResult {
    let unrated = ListingAttributes::default();
    ensure(
        resolve_token("is_lvd_voltage_range", &unrated) == TriState::Undefined,
        "no stated voltage means the question cannot be answered",
    )?;

    let mains = ListingAttributes {
        ac_voltage_min: Some(220),
        ac_voltage_max: Some(240),
        ..ListingAttributes::default()
    };
    ensure(
        resolve_token("is_lvd_voltage_range", &mains) == TriState::True,
        "a 220-240V AC rating intersects the LVD AC range",
    )?;

    let low_dc = ListingAttributes {
        dc_voltage_max: Some(12),
        ..ListingAttributes::default()
    };
    ensure(
        resolve_token("is_lvd_voltage_range", &low_dc) == TriState::False,
        "a 12V DC point rating is below the LVD DC range",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Resolver Tests
// ============================================================================

/// Tests the open-world default: no scoped entries means applicable.
#[test]
fn test_unscoped_rule_defaults_to_applicable() -> TestResult {
    let catalog = ApplicabilityCatalog {
        entries: vec![entry("other_rule", &["is_radio_equipment"], &["red"], &[])],
    };
    let state = resolve_applicability(
        &RuleId::new("unscoped_rule"),
        &ListingAttributes::default(),
        &catalog,
    );
    ensure(
        state == ApplicabilityState::Applicable,
        "a rule with no scoped entries applies by default",
    )
}

/// Tests that a firing exclusion entry short-circuits to not-applicable.
#[test]
fn test_exclusion_entry_short_circuits() -> TestResult {
    let catalog = ApplicabilityCatalog {
        entries: vec![
            // First entry in catalog order wins: not radio equipment would be
            // needed for an apply, but the exclusion fires first.
            entry("red_rule", &["is_excluded_military"], &[], &["red"]),
            entry("red_rule", &["is_radio_equipment"], &["red"], &[]),
        ],
    };
    let attributes = ListingAttributes {
        is_radio_equipment: true,
        is_military_equipment: true,
        ..ListingAttributes::default()
    };
    let state = resolve_applicability(&RuleId::new("red_rule"), &attributes, &catalog);
    ensure(
        state == ApplicabilityState::NotApplicable,
        "a firing exclusion must win over a later apply entry",
    )
}

/// Tests that a firing apply entry yields applicable.
#[test]
fn test_apply_entry_yields_applicable() -> TestResult {
    let catalog = ApplicabilityCatalog {
        entries: vec![entry("red_rule", &["is_radio_equipment"], &["red"], &[])],
    };
    let attributes = ListingAttributes {
        is_radio_equipment: true,
        ..ListingAttributes::default()
    };
    let state = resolve_applicability(&RuleId::new("red_rule"), &attributes, &catalog);
    ensure(state == ApplicabilityState::Applicable, "a firing apply entry applies the rule")
}

/// Tests that an undefined token makes the verdict unknown, not excluded.
#[test]
fn test_undefined_token_yields_unknown() -> TestResult {
    let catalog = ApplicabilityCatalog {
        entries: vec![entry("lvd_rule", &["is_lvd_voltage_range"], &["lvd"], &[])],
    };
    // No stated voltage: the condition cannot be evaluated.
    let state = resolve_applicability(
        &RuleId::new("lvd_rule"),
        &ListingAttributes::default(),
        &catalog,
    );
    ensure(
        state == ApplicabilityState::Unknown,
        "an unresolvable condition must surface as unknown",
    )
}

/// Tests that non-firing entries with defined tokens yield not-applicable.
#[test]
fn test_non_firing_entries_yield_not_applicable() -> TestResult {
    let catalog = ApplicabilityCatalog {
        entries: vec![entry("red_rule", &["is_radio_equipment"], &["red"], &[])],
    };
    // Radio flag is false: the entry's condition evaluates false cleanly.
    let state = resolve_applicability(
        &RuleId::new("red_rule"),
        &ListingAttributes::default(),
        &catalog,
    );
    ensure(
        state == ApplicabilityState::NotApplicable,
        "a cleanly false condition excludes the rule",
    )
}
