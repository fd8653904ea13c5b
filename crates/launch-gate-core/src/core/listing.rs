// crates/launch-gate-core/src/core/listing.rs
// ============================================================================
// Module: Launch Gate Listing Input
// Description: Listing attributes and raw embedded evidence documents.
// Purpose: Carry the compliance-relevant facts about one product submission.
// Dependencies: crate::core::{event, identifiers, time}, serde
// ============================================================================

//! ## Overview
//! A listing input carries the fixed compliance attributes used by token
//! resolution, plus raw evidence documents embedded in the submission payload.
//! Raw evidence arrives in one of two wire shapes, the current event-sourced
//! shape or a legacy single-status shape, and is decoded once into a tagged
//! union at this boundary rather than shape-sniffed downstream.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::event::VerificationEvent;
use crate::core::identifiers::ListingId;
use crate::core::time::VerificationTimestamp;

// ============================================================================
// SECTION: Listing Attributes
// ============================================================================

/// Fixed compliance attributes of one listing.
///
/// # Invariants
/// - Absent voltage ranges mean "not stated", not zero; token resolution
///   treats them as undefined rather than false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListingAttributes {
    /// Product intentionally emits or receives radio waves.
    #[serde(default)]
    pub is_radio_equipment: bool,
    /// Product falls under the medical-device exclusion.
    #[serde(default)]
    pub is_medical_device: bool,
    /// Product falls under the aviation-equipment exclusion.
    #[serde(default)]
    pub is_aviation_equipment: bool,
    /// Product falls under the military-equipment exclusion.
    #[serde(default)]
    pub is_military_equipment: bool,
    /// Lower bound of the rated AC input voltage, in volts.
    #[serde(default)]
    pub ac_voltage_min: Option<u32>,
    /// Upper bound of the rated AC input voltage, in volts.
    #[serde(default)]
    pub ac_voltage_max: Option<u32>,
    /// Lower bound of the rated DC input voltage, in volts.
    #[serde(default)]
    pub dc_voltage_min: Option<u32>,
    /// Upper bound of the rated DC input voltage, in volts.
    #[serde(default)]
    pub dc_voltage_max: Option<u32>,
    /// Product contains electronics relevant for electromagnetic compatibility.
    #[serde(default)]
    pub is_emc_relevant: bool,
    /// Product is battery powered.
    #[serde(default)]
    pub is_battery_powered: bool,
}

// ============================================================================
// SECTION: Raw Evidence Documents
// ============================================================================

/// Legacy single-status evidence states.
///
/// # Invariants
/// - Variants are stable; migration maps them onto verification decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyStatus {
    /// Document was present and believed valid.
    Present,
    /// Document was known stale.
    Stale,
    /// Document did not match the listing.
    Mismatched,
    /// Auditors disagreed about the document.
    Conflicted,
}

/// Current event-sourced evidence wire shape.
///
/// # Invariants
/// - `verification_events` is non-empty in valid documents; emptiness is
///   rejected during migration, not at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSourcedDoc {
    /// Human-readable document name.
    #[serde(default)]
    pub document_name: Option<String>,
    /// Days a verified document remains valid.
    pub ttl_days: u32,
    /// Ordered verification event history.
    pub verification_events: Vec<VerificationEvent>,
}

/// Legacy single-status evidence wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDoc {
    /// Human-readable document name.
    #[serde(default)]
    pub document_name: Option<String>,
    /// Last recorded status.
    pub status: LegacyStatus,
    /// Day of the last verification, when one was recorded.
    #[serde(default)]
    pub last_verified_at: Option<VerificationTimestamp>,
}

/// Raw evidence document as embedded in a listing payload.
///
/// Decoded once at this boundary; downstream code never inspects raw JSON to
/// guess the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEvidenceDoc {
    /// Current event-sourced shape.
    EventSourced(EventSourcedDoc),
    /// Old single-status shape.
    Legacy(LegacyDoc),
}

// ============================================================================
// SECTION: Listing Input
// ============================================================================

/// One product/channel/jurisdiction submission under evaluation.
///
/// # Invariants
/// - Evidence keys are looked up case-insensitively; the map preserves the
///   submitted spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingInput {
    /// Listing identifier.
    pub listing_id: ListingId,
    /// Fixed compliance attributes.
    #[serde(default)]
    pub attributes: ListingAttributes,
    /// Raw evidence documents keyed by submitted document key.
    #[serde(default)]
    pub evidence: BTreeMap<String, RawEvidenceDoc>,
}
