// crates/launch-gate-core/src/runtime/tokens.rs
// ============================================================================
// Module: Launch Gate Compliance Tokens
// Description: Named propositions about a listing resolved to tri-state values.
// Purpose: Convert listing attributes into deterministic tri-state truth values.
// Dependencies: crate::core::listing, tri-logic
// ============================================================================

//! ## Overview
//! Compliance tokens are the fixed vocabulary of the applicability catalog.
//! Each token names one proposition about a listing and resolves to a
//! tri-state value from the listing attributes. Unrecognized token names
//! resolve to `Undefined`, never silently to false: a typo in a catalog must
//! surface as "unknown applicability", not as a wrongly excluded rule.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tri_logic::TriState;

use crate::core::ListingAttributes;

// ============================================================================
// SECTION: Voltage Bounds
// ============================================================================

/// Low Voltage Directive AC range lower bound, in volts.
const LVD_AC_MIN: u32 = 50;
/// Low Voltage Directive AC range upper bound, in volts.
const LVD_AC_MAX: u32 = 1_000;
/// Low Voltage Directive DC range lower bound, in volts.
const LVD_DC_MIN: u32 = 75;
/// Low Voltage Directive DC range upper bound, in volts.
const LVD_DC_MAX: u32 = 1_500;

// ============================================================================
// SECTION: Compliance Tokens
// ============================================================================

/// The fixed set of recognized compliance tokens.
///
/// # Invariants
/// - Wire names are stable; the applicability catalog references them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceToken {
    /// Product intentionally emits or receives radio waves.
    IsRadioEquipment,
    /// Product falls under the medical-device exclusion.
    IsExcludedMedical,
    /// Product falls under the aviation-equipment exclusion.
    IsExcludedAviation,
    /// Product falls under the military-equipment exclusion.
    IsExcludedMilitary,
    /// Rated voltage intersects the Low Voltage Directive ranges.
    IsLvdVoltageRange,
    /// Product states an AC input rating.
    IsAcPowered,
    /// Product states a DC input rating.
    IsDcPowered,
    /// Product contains EMC-relevant electronics.
    IsEmcRelevant,
    /// Product is battery powered.
    IsBatteryPowered,
}

impl ComplianceToken {
    /// Resolves a token name, returning `None` for unrecognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "is_radio_equipment" => Some(Self::IsRadioEquipment),
            "is_excluded_medical" => Some(Self::IsExcludedMedical),
            "is_excluded_aviation" => Some(Self::IsExcludedAviation),
            "is_excluded_military" => Some(Self::IsExcludedMilitary),
            "is_lvd_voltage_range" => Some(Self::IsLvdVoltageRange),
            "is_ac_powered" => Some(Self::IsAcPowered),
            "is_dc_powered" => Some(Self::IsDcPowered),
            "is_emc_relevant" => Some(Self::IsEmcRelevant),
            "is_battery_powered" => Some(Self::IsBatteryPowered),
            _ => None,
        }
    }

    /// Resolves this token against listing attributes.
    #[must_use]
    pub fn resolve(self, attributes: &ListingAttributes) -> TriState {
        match self {
            Self::IsRadioEquipment => TriState::from(attributes.is_radio_equipment),
            Self::IsExcludedMedical => TriState::from(attributes.is_medical_device),
            Self::IsExcludedAviation => TriState::from(attributes.is_aviation_equipment),
            Self::IsExcludedMilitary => TriState::from(attributes.is_military_equipment),
            Self::IsLvdVoltageRange => lvd_voltage_range(attributes),
            Self::IsAcPowered => {
                TriState::from(attributes.ac_voltage_min.is_some() || attributes.ac_voltage_max.is_some())
            }
            Self::IsDcPowered => {
                TriState::from(attributes.dc_voltage_min.is_some() || attributes.dc_voltage_max.is_some())
            }
            Self::IsEmcRelevant => TriState::from(attributes.is_emc_relevant),
            Self::IsBatteryPowered => TriState::from(attributes.is_battery_powered),
        }
    }
}

/// Resolves a token name against listing attributes.
///
/// Unrecognized names yield `Undefined` so the applicability resolver can
/// report "unknown" instead of wrongly excluding a rule.
#[must_use]
pub fn resolve_token(name: &str, attributes: &ListingAttributes) -> TriState {
    ComplianceToken::from_name(name)
        .map_or(TriState::Undefined, |token| token.resolve(attributes))
}

// ============================================================================
// SECTION: Voltage Logic
// ============================================================================

/// Checks whether the rated voltage intersects an LVD range.
///
/// A listing with no stated voltage at all yields `Undefined`; the question
/// cannot be answered from the submission.
fn lvd_voltage_range(attributes: &ListingAttributes) -> TriState {
    let ac = range_intersects(
        attributes.ac_voltage_min,
        attributes.ac_voltage_max,
        LVD_AC_MIN,
        LVD_AC_MAX,
    );
    let dc = range_intersects(
        attributes.dc_voltage_min,
        attributes.dc_voltage_max,
        LVD_DC_MIN,
        LVD_DC_MAX,
    );
    match (ac, dc) {
        (None, None) => TriState::Undefined,
        (lhs, rhs) => TriState::from(lhs.unwrap_or(false) || rhs.unwrap_or(false)),
    }
}

/// Checks whether a stated `[min, max]` rating intersects `[lo, hi]`.
///
/// Returns `None` when neither bound is stated. A single stated bound is
/// treated as a point rating.
fn range_intersects(min: Option<u32>, max: Option<u32>, lo: u32, hi: u32) -> Option<bool> {
    let lower = min.or(max)?;
    let upper = max.or(min)?;
    Some(lower <= hi && upper >= lo)
}
