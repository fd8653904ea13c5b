// crates/tri-logic/src/lib.rs
// ============================================================================
// Module: Tri Logic Library
// Description: Public API surface for three-valued logic primitives.
// Purpose: Expose tri-state truth values and logic tables.
// Dependencies: crate::tristate
// ============================================================================

//! ## Overview
//! Tri Logic provides three-valued truth values (`true/false/undefined`) and
//! swappable logic tables for evaluating conditions over incomplete data. The
//! crate is domain-agnostic; consumers decide how truth values are produced.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod tristate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use tristate::BochvarLogic;
pub use tristate::KleeneLogic;
pub use tristate::LogicMode;
pub use tristate::TriLogic;
pub use tristate::TriState;
