//! # Engine Snapshots
//!
//! Persists engine state in the layout the rest of the system expects:
//!
//! - bindings keyed by the packed 24-bit proof identifier, each with the
//!   validator's catalog name and its revoked flag;
//! - ledger facts as `(fingerprint, proof, owner)` triples;
//! - LatestEpoch, the reference parameters and the owner;
//! - optionally, the event journal.
//!
//! [`ProofEngine::snapshot`] captures state only, so its size depends on
//! the live ledger and bindings and not on how many operations produced
//! them. [`ProofEngine::snapshot_with_journal`] also carries the
//! undrained journal; callers that persist it are expected to drain it.
//!
//! Validator capabilities are not serializable. A snapshot stores each
//! binding's name, and restoring resolves it through a [`ValidatorCatalog`].
//! Output is deterministic: bindings and facts are written in key order.

use std::collections::BTreeMap;
use std::path::Path;

use pve_core::{Identity, ProofIdentifier, ReferenceParameters};
use pve_validator::ValidatorCatalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::ProofEngine;
use crate::events::EventRecord;
use crate::ledger::{LedgerKey, ValidatedProofLedger};
use crate::registry::ValidatorRegistry;

/// Error saving or restoring a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A binding names a validator the catalog does not know.
    #[error("proof {proof} is bound to validator {name:?}, which is not in the catalog")]
    UnknownValidatorName {
        /// The bound identifier.
        proof: ProofIdentifier,
        /// The unresolved validator name.
        name: String,
    },

    /// A binding key is not a valid 24-bit identifier.
    #[error("binding key {0} is not a 24-bit proof identifier")]
    InvalidBindingKey(u32),

    /// JSON encoding or decoding failed.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the snapshot file failed.
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A persisted validator binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Catalog name of the bound validator.
    pub validator: String,
    /// Whether the binding is revoked.
    pub revoked: bool,
}

/// Serializable image of a [`ProofEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Holder of the owner credential.
    pub owner: Identity,
    /// LatestEpoch.
    pub latest_epoch: u32,
    /// Common reference parameters.
    pub reference_parameters: ReferenceParameters,
    /// Bindings keyed by packed proof identifier.
    pub validators: BTreeMap<u32, BindingRecord>,
    /// Validated-proof facts.
    pub ledger: Vec<LedgerKey>,
    /// Undrained event journal, oldest first. Empty unless captured with
    /// [`ProofEngine::snapshot_with_journal`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
}

impl EngineSnapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write a snapshot file.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl ProofEngine {
    /// Capture the engine's state, without the event journal.
    pub fn snapshot(&self) -> EngineSnapshot {
        let validators = self
            .registry
            .iter()
            .map(|(proof, binding)| {
                (
                    proof.packed(),
                    BindingRecord {
                        validator: binding.handle().name().to_string(),
                        revoked: binding.is_revoked(),
                    },
                )
            })
            .collect();
        let mut ledger: Vec<LedgerKey> = self.ledger.iter().copied().collect();
        ledger.sort();
        EngineSnapshot {
            owner: self.owner,
            latest_epoch: self.latest_epoch,
            reference_parameters: self.reference_parameters,
            validators,
            ledger,
            events: Vec::new(),
        }
    }

    /// Capture the engine's state together with its undrained journal.
    pub fn snapshot_with_journal(&self) -> EngineSnapshot {
        EngineSnapshot {
            events: self.journal.clone(),
            ..self.snapshot()
        }
    }

    /// Rebuild an engine from a snapshot, binding validators by name.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::InvalidBindingKey`] for a key above 24 bits.
    /// - [`SnapshotError::UnknownValidatorName`] if `catalog` lacks a name.
    pub fn restore(
        snapshot: EngineSnapshot,
        catalog: &ValidatorCatalog,
    ) -> Result<Self, SnapshotError> {
        let mut registry = ValidatorRegistry::new();
        for (packed, record) in snapshot.validators {
            let proof = ProofIdentifier::from_packed(packed)
                .map_err(|_| SnapshotError::InvalidBindingKey(packed))?;
            let handle = catalog
                .get(&record.validator)
                .ok_or(SnapshotError::UnknownValidatorName {
                    proof,
                    name: record.validator,
                })?;
            registry.restore(proof, handle, record.revoked);
        }

        let mut ledger = ValidatedProofLedger::new();
        for key in snapshot.ledger {
            ledger.record(key.proof, key.owner, [key.fingerprint]);
        }

        tracing::debug!(
            validators = registry.len(),
            ledger = ledger.len(),
            latest_epoch = snapshot.latest_epoch,
            "engine restored from snapshot"
        );

        Ok(Self {
            owner: snapshot.owner,
            latest_epoch: snapshot.latest_epoch,
            reference_parameters: snapshot.reference_parameters,
            registry,
            ledger,
            journal: snapshot.events,
        })
    }
}
