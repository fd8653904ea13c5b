// crates/launch-gate-core/src/runtime/repository.rs
// ============================================================================
// Module: Launch Gate Evidence Repository
// Description: Embedded-listing evidence resolution with legacy migration.
// Purpose: Upgrade raw evidence documents into evidence aggregates.
// Dependencies: crate::{core, interfaces}, time
// ============================================================================

//! ## Overview
//! The default repository reads evidence embedded in the listing payload and
//! performs no persistence on save. Legacy single-status documents are
//! transparently upgraded into one synthetic verification event; the current
//! event-sourced shape is reconstructed as-is. Invariant violations in raw
//! documents (empty histories, zero TTLs, duplicate event identifiers, blank
//! event fields) are
//! downgraded to "absent" so the evaluator reports them as missing evidence
//! rather than failing the whole evaluation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use time::macros::date;

use crate::core::ConfidenceLevel;
use crate::core::DocumentKey;
use crate::core::EventId;
use crate::core::Evidence;
use crate::core::EvidenceError;
use crate::core::LegacyDoc;
use crate::core::LegacyStatus;
use crate::core::ListingInput;
use crate::core::RawEvidenceDoc;
use crate::core::VerificationDecision;
use crate::core::VerificationEvent;
use crate::core::VerificationTimestamp;
use crate::interfaces::EvidenceRepository;
use crate::interfaces::RepositoryError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fallback TTL for documents without a dedicated table entry, in days.
pub const DEFAULT_TTL_DAYS: u32 = 365;
/// TTL for long-lived EU declaration categories, in days.
pub const LONG_LIVED_TTL_DAYS: u32 = 1_095;

/// Document-key prefixes that map to the long-lived TTL.
const LONG_LIVED_KEY_PREFIXES: [&str; 3] =
    ["eu_declaration_of_conformity", "eu_doc", "ce_marking"];

/// Sentinel timestamp for legacy documents without a verification date.
const LEGACY_SENTINEL_DAY: time::Date = date!(1970 - 01 - 01);

/// Verifier identity recorded on migrated legacy events.
const LEGACY_VERIFIER: &str = "legacy_import";
/// Reason recorded when a legacy document carried no verification date.
pub const REASON_LEGACY_NO_DATE: &str = "legacy_no_verification_date";
/// Reason recorded when a legacy document carried a verification date.
pub const REASON_LEGACY_MIGRATED: &str = "legacy_migrated";

// ============================================================================
// SECTION: TTL Table
// ============================================================================

/// Static per-document-key TTL defaults with host overrides.
///
/// # Invariants
/// - All TTL values are strictly positive day counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlTable {
    /// Fallback TTL in days.
    default_days: u32,
    /// TTL for long-lived EU declaration categories, in days.
    long_lived_days: u32,
    /// Per-key overrides (normalized keys).
    overrides: BTreeMap<DocumentKey, u32>,
}

impl Default for TtlTable {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_TTL_DAYS,
            long_lived_days: LONG_LIVED_TTL_DAYS,
            overrides: BTreeMap::new(),
        }
    }
}

impl TtlTable {
    /// Creates a TTL table with explicit defaults and per-key overrides.
    #[must_use]
    pub const fn new(
        default_days: u32,
        long_lived_days: u32,
        overrides: BTreeMap<DocumentKey, u32>,
    ) -> Self {
        Self {
            default_days,
            long_lived_days,
            overrides,
        }
    }

    /// Returns the TTL for a document key.
    #[must_use]
    pub fn ttl_for(&self, key: &DocumentKey) -> u32 {
        if let Some(ttl) = self.overrides.get(key) {
            return *ttl;
        }
        if LONG_LIVED_KEY_PREFIXES.iter().any(|prefix| key.as_str().starts_with(prefix)) {
            return self.long_lived_days;
        }
        self.default_days
    }
}

// ============================================================================
// SECTION: Migration
// ============================================================================

/// Upgrades a raw evidence document into an evidence aggregate.
///
/// # Errors
///
/// Returns [`EvidenceError`] when the document violates evidence invariants
/// (empty history, zero TTL, duplicate event identifiers, blank event fields).
pub fn migrate_evidence(
    key: &DocumentKey,
    doc: &RawEvidenceDoc,
    ttl_table: &TtlTable,
) -> Result<Evidence, EvidenceError> {
    match doc {
        RawEvidenceDoc::EventSourced(doc) => Evidence::from_events(
            key.clone(),
            doc.document_name.clone().unwrap_or_else(|| key.as_str().to_string()),
            doc.ttl_days,
            doc.verification_events.clone(),
        ),
        RawEvidenceDoc::Legacy(doc) => migrate_legacy(key, doc, ttl_table),
    }
}

/// Upgrades a legacy single-status document into one synthetic event.
fn migrate_legacy(
    key: &DocumentKey,
    doc: &LegacyDoc,
    ttl_table: &TtlTable,
) -> Result<Evidence, EvidenceError> {
    let decision = match doc.status {
        LegacyStatus::Stale | LegacyStatus::Mismatched => VerificationDecision::Rejected,
        LegacyStatus::Conflicted => VerificationDecision::Conflicted,
        LegacyStatus::Present => VerificationDecision::Verified,
    };
    let (timestamp, reason) = doc.last_verified_at.map_or_else(
        || {
            (
                VerificationTimestamp::from_day(LEGACY_SENTINEL_DAY),
                REASON_LEGACY_NO_DATE,
            )
        },
        |at| (at, REASON_LEGACY_MIGRATED),
    );
    let event = VerificationEvent::new(
        EventId::new(1),
        timestamp,
        decision,
        LEGACY_VERIFIER,
        reason,
        ConfidenceLevel::Low,
    )?;
    Evidence::from_events(
        key.clone(),
        doc.document_name.clone().unwrap_or_else(|| key.as_str().to_string()),
        ttl_table.ttl_for(key),
        vec![event],
    )
}

// ============================================================================
// SECTION: Listing Evidence Repository
// ============================================================================

/// Repository resolving evidence embedded in the listing payload.
///
/// # Invariants
/// - `save` performs no persistence; durability belongs to the host.
#[derive(Debug, Clone, Default)]
pub struct ListingEvidenceRepository {
    /// TTL defaults applied during legacy migration.
    ttl_table: TtlTable,
}

impl ListingEvidenceRepository {
    /// Creates a repository with default TTL settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with an explicit TTL table.
    #[must_use]
    pub const fn with_ttl_table(ttl_table: TtlTable) -> Self {
        Self {
            ttl_table,
        }
    }
}

impl EvidenceRepository for ListingEvidenceRepository {
    fn load(
        &self,
        key: &DocumentKey,
        listing: &ListingInput,
    ) -> Result<Option<Evidence>, RepositoryError> {
        let Some(doc) = listing
            .evidence
            .iter()
            .find(|(raw_key, _)| &DocumentKey::new(raw_key) == key)
            .map(|(_, doc)| doc)
        else {
            return Ok(None);
        };
        // Broken documents are reported as absent, not as faults.
        Ok(migrate_evidence(key, doc, &self.ttl_table).ok())
    }

    fn save(
        &mut self,
        _evidence: &Evidence,
        _listing: &ListingInput,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }
}
