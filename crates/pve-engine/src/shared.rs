//! # Shared Engine
//!
//! Thread-safe, cloneable wrapper around a [`ProofEngine`] for hosts that
//! accept requests from several callers at once.
//!
//! Every operation runs as one critical section, giving a total order over
//! transactions, except dispatch: `validate` resolves under a read lock,
//! invokes the validator with no lock held, and commits under a write lock.
//! A validator that calls back into the engine therefore does not deadlock,
//! and a revocation that commits while the validator runs causes the outer
//! dispatch to fail with no ledger writes. The same holds for a reference
//! parameter change, since the validator checked the old parameters.
//!
//! The lock is `parking_lot::RwLock`, which is non-poisonable; every
//! critical section either completes or leaves state unchanged.

use std::sync::Arc;

use parking_lot::RwLock;
use pve_core::{EngineError, Fingerprint, Identity, ProofIdentifier, ReferenceParameters};
use pve_validator::{OutputBlob, ValidatorHandle};

use crate::engine::ProofEngine;

/// A cloneable handle to one engine shared across threads.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<ProofEngine>>,
}

impl SharedEngine {
    /// Share `engine`.
    pub fn new(engine: ProofEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// See [`ProofEngine::validate`].
    pub fn validate(
        &self,
        proof: ProofIdentifier,
        sender: Identity,
        proof_data: &[u8],
    ) -> Result<OutputBlob, EngineError> {
        let dispatch = self.inner.read().prepare(proof)?;
        let blob = dispatch.invoke(&sender, proof_data).map_err(|e| {
            tracing::warn!(proof = %dispatch.proof, kind = e.kind(), error = %e, "operation rejected");
            e
        })?;
        self.inner.write().commit(&dispatch, sender, &blob)?;
        Ok(blob)
    }

    /// See [`ProofEngine::validate_by_hash`].
    pub fn validate_by_hash(
        &self,
        proof: ProofIdentifier,
        fingerprint: Fingerprint,
        claimed_sender: Identity,
    ) -> Result<bool, EngineError> {
        self.inner
            .read()
            .validate_by_hash(proof, fingerprint, claimed_sender)
    }

    /// See [`ProofEngine::clear`].
    pub fn clear(
        &self,
        proof: ProofIdentifier,
        fingerprints: &[Fingerprint],
        caller: Identity,
    ) -> Result<(), EngineError> {
        self.inner.write().clear(proof, fingerprints, caller)
    }

    /// See [`ProofEngine::set_validator`].
    pub fn set_validator(
        &self,
        caller: Identity,
        proof: ProofIdentifier,
        handle: ValidatorHandle,
    ) -> Result<(), EngineError> {
        self.inner.write().set_validator(caller, proof, handle)
    }

    /// See [`ProofEngine::invalidate`].
    pub fn invalidate(&self, caller: Identity, proof: ProofIdentifier) -> Result<(), EngineError> {
        self.inner.write().invalidate(caller, proof)
    }

    /// See [`ProofEngine::increment_epoch`].
    pub fn increment_epoch(&self, caller: Identity) -> Result<u32, EngineError> {
        self.inner.write().increment_epoch(caller)
    }

    /// See [`ProofEngine::set_reference_parameters`].
    pub fn set_reference_parameters(
        &self,
        caller: Identity,
        params: ReferenceParameters,
    ) -> Result<(), EngineError> {
        self.inner.write().set_reference_parameters(caller, params)
    }

    /// See [`ProofEngine::transfer_ownership`].
    pub fn transfer_ownership(&self, caller: Identity, new_owner: Identity) -> Result<(), EngineError> {
        self.inner.write().transfer_ownership(caller, new_owner)
    }

    /// The common reference parameters.
    pub fn reference_parameters(&self) -> ReferenceParameters {
        *self.inner.read().reference_parameters()
    }

    /// Run `f` against a consistent read view of the engine.
    pub fn read<T>(&self, f: impl FnOnce(&ProofEngine) -> T) -> T {
        f(&self.inner.read())
    }
}
