// crates/launch-gate-core/src/lib.rs
// ============================================================================
// Module: Launch Gate Core Library
// Description: Public API surface for the Launch Gate core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Launch Gate core decides whether an e-commerce listing is ready to launch:
//! it tracks verification evidence as append-only event histories, resolves
//! which compliance rules apply through tri-state applicability logic, and
//! evaluates rules into blocking errors and warnings. Evaluation is
//! deterministic: every time-sensitive operation takes its instant explicitly
//! and nothing in the crate reads a clock.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::EvidenceRepository;
pub use interfaces::RepositoryError;
pub use runtime::ApplicabilityState;
pub use runtime::ComplianceToken;
pub use runtime::ContentPolicy;
pub use runtime::EvaluatorConfig;
pub use runtime::GeneratedContent;
pub use runtime::ListingEvidenceRepository;
pub use runtime::RuleEvaluator;
pub use runtime::TtlTable;
pub use runtime::blockable;
pub use runtime::migrate_evidence;
pub use runtime::resolve_applicability;
pub use runtime::resolve_token;
