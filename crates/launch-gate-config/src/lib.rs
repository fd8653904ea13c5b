// crates/launch-gate-config/src/lib.rs
// ============================================================================
// Module: Launch Gate Config Library
// Description: Canonical config model, validation, and document decoding.
// Purpose: Single source of truth for launch-gate.toml and input documents.
// Dependencies: launch-gate-core, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! `launch-gate-config` defines the canonical configuration model for Launch
//! Gate and the schema boundary for untrusted input documents. Config loading
//! is strict and fail-closed; document decoding reports violations as
//! field-pathed issues rather than faults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod documents;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::EvaluationConfig;
pub use config::LaunchGateConfig;
pub use config::TtlConfig;
pub use documents::DocumentIssue;
pub use documents::decode_applicability_catalog;
pub use documents::decode_listing;
pub use documents::decode_rule_catalog;
