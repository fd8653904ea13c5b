// crates/launch-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared helpers for launch-gate-core integration tests.
// ============================================================================
//! ## Overview
//! Shared test helpers: Result-based assertions plus builders for days,
//! evidence, and catalog records used across the suites.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output, panic-based assertions, and per-suite helper usage."
)]

use std::error::Error;
use std::fmt;

use launch_gate_core::ConfidenceLevel;
use launch_gate_core::DocumentKey;
use launch_gate_core::RequirementType;
use launch_gate_core::RuleId;
use launch_gate_core::RuleRecord;
use launch_gate_core::SourceType;
use launch_gate_core::VerificationTimestamp;
use time::Date;
use time::Month;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across launch-gate-core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl TestError {
    /// Creates a new test error with the provided message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(Box::new(TestError::new(message))) }
}

// ========================================================================
// Domain Builders
// ========================================================================

/// Builds a timestamp for a calendar day in 2025.
///
/// # Panics
/// Panics on an invalid month or day; test inputs are fixed literals.
pub fn day_2025(month: u8, day: u8) -> VerificationTimestamp {
    let month = Month::try_from(month).expect("valid month literal");
    let date = Date::from_calendar_date(2025, month, day).expect("valid day literal");
    VerificationTimestamp::from_day(date)
}

/// Builds a blockable legal rule requiring the given evidence keys.
pub fn legal_rule(rule_id: &str, evidence_keys: &[&str]) -> RuleRecord {
    RuleRecord {
        rule_id: RuleId::new(rule_id),
        jurisdiction: "eu".to_string(),
        channel: "amazon_de".to_string(),
        requirement_type: RequirementType::Legal,
        required_evidence_keys: evidence_keys.iter().map(DocumentKey::new).collect(),
        source_type: SourceType::Eurlex,
        confidence: ConfidenceLevel::High,
        verified_at: day_2025(1, 1),
    }
}

/// Builds a marketplace rule requiring the given evidence keys.
pub fn marketplace_rule(rule_id: &str, evidence_keys: &[&str]) -> RuleRecord {
    RuleRecord {
        requirement_type: RequirementType::Marketplace,
        source_type: SourceType::AmazonOfficial,
        ..legal_rule(rule_id, evidence_keys)
    }
}
