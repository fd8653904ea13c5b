// crates/launch-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Launch Gate Runtime
// Description: Token resolution, applicability, evaluation, and policy checks.
// Purpose: Turn core data into launch-readiness decisions.
// Dependencies: crate::runtime submodules
// ============================================================================

//! ## Overview
//! The runtime layers sit on top of the core data model: token resolution
//! maps listing attributes to tri-state values, the applicability resolver
//! decides which rules apply, the evaluator produces outcome rows and
//! verdicts, the repository bridges raw embedded evidence, and the policy
//! check validates generated content. Everything here is synchronous and
//! deterministic given its inputs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod applicability;
pub mod evaluator;
pub mod policy;
pub mod repository;
pub mod tokens;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use applicability::ApplicabilityState;
pub use applicability::resolve_applicability;
pub use evaluator::EvaluatorConfig;
pub use evaluator::RuleEvaluator;
pub use evaluator::blockable;
pub use policy::ContentPolicy;
pub use policy::GeneratedContent;
pub use repository::ListingEvidenceRepository;
pub use repository::TtlTable;
pub use repository::migrate_evidence;
pub use tokens::ComplianceToken;
pub use tokens::resolve_token;
