// crates/launch-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Launch Gate Interfaces
// Description: Backend-agnostic interfaces for evidence resolution.
// Purpose: Define the contract surface between the evaluator and storage.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The evaluator resolves evidence through a repository interface rather than
//! embedding storage details. Implementations must be deterministic and fail
//! closed: broken or unreadable evidence is reported as absent, never surfaced
//! as a fault into evaluation output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DocumentKey;
use crate::core::Evidence;
use crate::core::ListingInput;

// ============================================================================
// SECTION: Evidence Repository
// ============================================================================

/// Evidence repository errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Backing store reported an error.
    #[error("evidence repository error: {0}")]
    Backend(String),
}

/// Resolves document keys to evidence values for one listing.
///
/// Implementations migrate legacy persisted shapes before returning and
/// downgrade invariant violations (empty histories, invalid TTLs) to `None`.
pub trait EvidenceRepository {
    /// Resolves a document key to evidence, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the backing store itself fails.
    fn load(
        &self,
        key: &DocumentKey,
        listing: &ListingInput,
    ) -> Result<Option<Evidence>, RepositoryError>;

    /// Persists an evidence value for a listing.
    ///
    /// The core never calls this itself; it exists for hosts that own
    /// durability. Implementations without storage return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the backing store itself fails.
    fn save(&mut self, evidence: &Evidence, listing: &ListingInput) -> Result<(), RepositoryError>;
}
