//! # Validated Proof Ledger
//!
//! A set of facts of the form "this sub-output fingerprint, for this proof
//! type and this caller, has been validated". The ledger is the only bridge
//! of trust between the party that validates a balanced proof and any party
//! that later relies on it without re-running cryptography.
//!
//! ## Keys
//!
//! A record is keyed by the structured triple `(fingerprint, proof, owner)`;
//! `LedgerKey` derives `Hash` over all three fields. A fact is present
//! (true) or absent (false); clearing removes the entry and reclaims its
//! storage.
//!
//! ## Invariants
//!
//! - Records are inserted only by dispatch, after a validator accepted a
//!   balanced proof.
//! - Records are removed only by `clear`, only by the owner that created
//!   them, and only all-or-nothing for a given request.

use std::collections::{hash_set, HashSet};

use pve_core::{EngineError, Fingerprint, Identity, ProofIdentifier};
use serde::{Deserialize, Serialize};

/// Composite key of a validated-proof record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerKey {
    /// Fingerprint of the validated sub-output.
    pub fingerprint: Fingerprint,
    /// Proof type that produced the sub-output.
    pub proof: ProofIdentifier,
    /// Identity the proof was validated for.
    pub owner: Identity,
}

impl LedgerKey {
    /// Build a key.
    pub fn new(fingerprint: Fingerprint, proof: ProofIdentifier, owner: Identity) -> Self {
        Self {
            fingerprint,
            proof,
            owner,
        }
    }
}

/// The set of validated-proof facts.
#[derive(Debug, Clone, Default)]
pub struct ValidatedProofLedger {
    records: HashSet<LedgerKey>,
}

impl ValidatedProofLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every fingerprint as validated for `(proof, owner)`.
    /// Already-present facts stay present.
    pub fn record(
        &mut self,
        proof: ProofIdentifier,
        owner: Identity,
        fingerprints: impl IntoIterator<Item = Fingerprint>,
    ) {
        for fingerprint in fingerprints {
            self.records.insert(LedgerKey::new(fingerprint, proof, owner));
        }
    }

    /// Whether the fact `(fingerprint, proof, owner)` is recorded.
    pub fn contains(&self, fingerprint: Fingerprint, proof: ProofIdentifier, owner: Identity) -> bool {
        self.records.contains(&LedgerKey::new(fingerprint, proof, owner))
    }

    /// Remove the facts `(fingerprint, proof, caller)` for every listed
    /// fingerprint.
    ///
    /// Every fingerprint is checked before anything is removed, so a failing
    /// request leaves the ledger untouched. Listing the same fingerprint twice
    /// fails: the second occurrence no longer has a record to clear.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidFingerprint`] for an all-zero fingerprint.
    /// - [`EngineError::NotPreviouslyValidated`] for a fingerprint with no
    ///   record owned by `caller` under `proof`.
    pub fn clear(
        &mut self,
        proof: ProofIdentifier,
        fingerprints: &[Fingerprint],
        caller: Identity,
    ) -> Result<(), EngineError> {
        let mut pending = HashSet::with_capacity(fingerprints.len());
        for (index, fingerprint) in fingerprints.iter().enumerate() {
            if fingerprint.is_zero() {
                return Err(EngineError::InvalidFingerprint { index });
            }
            let key = LedgerKey::new(*fingerprint, proof, caller);
            if !self.records.contains(&key) || !pending.insert(key) {
                return Err(EngineError::NotPreviouslyValidated {
                    proof,
                    fingerprint: *fingerprint,
                });
            }
        }
        for key in &pending {
            self.records.remove(key);
        }
        Ok(())
    }

    /// Number of recorded facts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no facts are recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All recorded facts, in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, LedgerKey> {
        self.records.iter()
    }
}
