//! # Proof Dispatch
//!
//! Routes proof-validation requests to the bound validator, records the
//! fingerprints of accepted balanced proofs, and answers later "was this
//! validated?" queries from the ledger.
//!
//! ## Dispatch Phases
//!
//! ```text
//! prepare  (&engine)  resolve the binding, copy the reference parameters
//! invoke   (no engine) run foreign validator code
//! commit   (&mut engine) re-resolve, then write every ledger record
//! ```
//!
//! ## Security Invariant
//!
//! No engine state is written before the validator returns, and the
//! validator receives only owned copies of what it needs. A validator that
//! tries to re-enter the engine cannot observe or cause a half-applied
//! dispatch. A rejection at any phase leaves the ledger untouched.

use pve_core::{EngineError, Fingerprint, Identity, ProofIdentifier, ReferenceParameters};
use pve_validator::{OutputBlob, ValidatorHandle};

use crate::engine::ProofEngine;
use crate::events::EngineEvent;

/// A resolved dispatch, detached from the engine.
#[derive(Debug, Clone)]
pub(crate) struct PreparedDispatch {
    pub(crate) proof: ProofIdentifier,
    handle: ValidatorHandle,
    params: ReferenceParameters,
}

impl PreparedDispatch {
    /// Run the validator. Touches no engine state.
    pub(crate) fn invoke(
        &self,
        sender: &Identity,
        proof_data: &[u8],
    ) -> Result<OutputBlob, EngineError> {
        self.handle
            .invoke(proof_data, sender, &self.params)
            .map_err(|rejection| EngineError::ValidationRejected {
                proof: self.proof,
                reason: rejection.to_string(),
            })
    }
}

impl ProofEngine {
    /// Validate `proof_data` for `sender` under proof type `proof`.
    ///
    /// On success returns the validator's output. For balanced proofs every
    /// sub-output fingerprint is recorded as `(fingerprint, proof, sender)`;
    /// other categories never touch the ledger.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownValidator`] if `proof` is not bound.
    /// - [`EngineError::DisabledValidator`] if `proof` is revoked.
    /// - [`EngineError::ValidationRejected`] if the validator declines.
    pub fn validate(
        &mut self,
        proof: ProofIdentifier,
        sender: Identity,
        proof_data: &[u8],
    ) -> Result<OutputBlob, EngineError> {
        let dispatch = self.prepare(proof)?;
        let blob = dispatch.invoke(&sender, proof_data).map_err(|e| rejected("validate", e))?;
        self.commit(&dispatch, sender, &blob)?;
        Ok(blob)
    }

    /// Whether `(fingerprint, proof, claimed_sender)` is a recorded fact.
    ///
    /// The revocation flag is checked first: a revoked proof type cannot be
    /// consulted even though its facts remain in the ledger. An unbound
    /// identifier is not revoked and simply has no facts.
    ///
    /// # Errors
    ///
    /// [`EngineError::DisabledValidator`] if `proof` is revoked.
    pub fn validate_by_hash(
        &self,
        proof: ProofIdentifier,
        fingerprint: Fingerprint,
        claimed_sender: Identity,
    ) -> Result<bool, EngineError> {
        if self.registry.is_revoked(proof) {
            return Err(rejected(
                "validate_by_hash",
                EngineError::DisabledValidator { proof },
            ));
        }
        let validated = self.ledger.contains(fingerprint, proof, claimed_sender);
        tracing::debug!(
            proof = %proof,
            fingerprint = %fingerprint,
            sender = %claimed_sender,
            validated,
            "ledger consulted"
        );
        Ok(validated)
    }

    /// Clear the facts `(fingerprint, proof, caller)` for every listed
    /// fingerprint. All or nothing.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidFingerprint`] for an all-zero fingerprint.
    /// - [`EngineError::NotPreviouslyValidated`] if any fingerprint has no
    ///   record created by `caller` under `proof`.
    pub fn clear(
        &mut self,
        proof: ProofIdentifier,
        fingerprints: &[Fingerprint],
        caller: Identity,
    ) -> Result<(), EngineError> {
        self.ledger
            .clear(proof, fingerprints, caller)
            .map_err(|e| rejected("clear", e))?;
        if fingerprints.is_empty() {
            return Ok(());
        }
        tracing::info!(
            proof = %proof,
            caller = %caller,
            fingerprints = fingerprints.len(),
            "validated proofs cleared"
        );
        self.emit(EngineEvent::ProofsCleared {
            proof,
            caller,
            fingerprints: fingerprints.to_vec(),
        });
        Ok(())
    }

    pub(crate) fn prepare(&self, proof: ProofIdentifier) -> Result<PreparedDispatch, EngineError> {
        let handle = self
            .registry
            .resolve(proof)
            .map_err(|e| rejected("validate", e))?;
        Ok(PreparedDispatch {
            proof,
            handle,
            params: self.reference_parameters,
        })
    }

    /// Record the outcome of an accepted dispatch.
    ///
    /// The binding is resolved again so a revocation committed while the
    /// validator ran blocks the write. Likewise the reference parameters must
    /// still be the ones the validator checked against.
    pub(crate) fn commit(
        &mut self,
        dispatch: &PreparedDispatch,
        sender: Identity,
        blob: &OutputBlob,
    ) -> Result<(), EngineError> {
        let proof = dispatch.proof;
        self.registry
            .resolve(proof)
            .map_err(|e| rejected("validate", e))?;
        if self.reference_parameters != dispatch.params {
            return Err(rejected(
                "validate",
                EngineError::ValidationRejected {
                    proof,
                    reason: "reference parameters changed during validation".to_string(),
                },
            ));
        }

        if !proof.is_balanced() {
            tracing::info!(
                proof = %proof,
                sender = %sender,
                sub_outputs = blob.len(),
                "proof validated"
            );
            return Ok(());
        }

        let fingerprints = blob.fingerprints();
        self.ledger.record(proof, sender, fingerprints.iter().copied());
        tracing::info!(
            proof = %proof,
            sender = %sender,
            fingerprints = fingerprints.len(),
            "balanced proof validated and recorded"
        );
        self.emit(EngineEvent::ProofValidated {
            proof,
            sender,
            fingerprints,
        });
        Ok(())
    }
}

fn rejected(operation: &'static str, err: EngineError) -> EngineError {
    tracing::warn!(operation, kind = err.kind(), error = %err, "operation rejected");
    err
}
