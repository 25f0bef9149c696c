//! # Admin Controller
//!
//! Owner-gated operations that mutate the registry and the global
//! versioning state. Each takes the caller's identity explicitly and fails
//! [`EngineError::Unauthorized`] with no state change unless the caller
//! holds the owner credential.
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |---|---|
//! | `set_validator` | write-once registry binding, epoch-gated |
//! | `invalidate` | irreversible revocation |
//! | `increment_epoch` | LatestEpoch += 1 |
//! | `set_reference_parameters` | replace the shared parameters wholesale |
//! | `transfer_ownership` | move the owner credential |

use pve_core::{EngineError, Identity, ProofIdentifier, ReferenceParameters};
use pve_validator::ValidatorHandle;

use crate::engine::ProofEngine;
use crate::events::EngineEvent;

impl ProofEngine {
    /// Bind `handle` to `proof`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unauthorized`] if `caller` is not the owner.
    /// - [`EngineError::EpochExceeded`] if `proof.epoch()` is newer than
    ///   LatestEpoch.
    /// - [`EngineError::AlreadyRegistered`] if `proof` is already bound.
    pub fn set_validator(
        &mut self,
        caller: Identity,
        proof: ProofIdentifier,
        handle: ValidatorHandle,
    ) -> Result<(), EngineError> {
        self.authorize("set_validator", caller)?;
        let validator = handle.name().to_string();
        self.registry
            .register(proof, handle, self.latest_epoch)
            .map_err(|e| denied("set_validator", e))?;
        tracing::info!(proof = %proof, validator = %validator, "validator set");
        self.emit(EngineEvent::ValidatorSet { proof, validator });
        Ok(())
    }

    /// Revoke the binding for `proof`. Irreversible. Invalidating an
    /// already revoked binding succeeds without emitting an event.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unauthorized`] if `caller` is not the owner.
    /// - [`EngineError::UnknownValidator`] if `proof` is not bound.
    pub fn invalidate(&mut self, caller: Identity, proof: ProofIdentifier) -> Result<(), EngineError> {
        self.authorize("invalidate", caller)?;
        let changed = self
            .registry
            .revoke(proof)
            .map_err(|e| denied("invalidate", e))?;
        if !changed {
            tracing::debug!(proof = %proof, "validator already invalidated");
            return Ok(());
        }
        tracing::info!(proof = %proof, "validator invalidated");
        self.emit(EngineEvent::ValidatorInvalidated { proof });
        Ok(())
    }

    /// Advance LatestEpoch by one.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unauthorized`] if `caller` is not the owner.
    /// - [`EngineError::EpochOverflow`] if the counter is saturated.
    pub fn increment_epoch(&mut self, caller: Identity) -> Result<u32, EngineError> {
        self.authorize("increment_epoch", caller)?;
        let next = self.latest_epoch.checked_add(1).ok_or_else(|| {
            denied(
                "increment_epoch",
                EngineError::EpochOverflow {
                    latest: self.latest_epoch,
                },
            )
        })?;
        self.latest_epoch = next;
        tracing::info!(latest_epoch = next, "latest epoch incremented");
        self.emit(EngineEvent::EpochIncremented { latest_epoch: next });
        Ok(next)
    }

    /// Replace the common reference parameters. The values are not checked.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthorized`] if `caller` is not the owner.
    pub fn set_reference_parameters(
        &mut self,
        caller: Identity,
        params: ReferenceParameters,
    ) -> Result<(), EngineError> {
        self.authorize("set_reference_parameters", caller)?;
        self.reference_parameters = params;
        tracing::info!("reference parameters set");
        self.emit(EngineEvent::ReferenceParametersSet);
        Ok(())
    }

    /// Hand the owner credential to `new_owner`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthorized`] if `caller` is not the owner.
    pub fn transfer_ownership(
        &mut self,
        caller: Identity,
        new_owner: Identity,
    ) -> Result<(), EngineError> {
        self.authorize("transfer_ownership", caller)?;
        let previous = std::mem::replace(&mut self.owner, new_owner);
        tracing::info!(previous = %previous, current = %new_owner, "ownership transferred");
        self.emit(EngineEvent::OwnershipTransferred {
            previous,
            current: new_owner,
        });
        Ok(())
    }

    fn authorize(&self, operation: &'static str, caller: Identity) -> Result<(), EngineError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(denied(operation, EngineError::Unauthorized { caller }))
        }
    }
}

fn denied(operation: &'static str, err: EngineError) -> EngineError {
    tracing::warn!(operation, kind = err.kind(), error = %err, "admin operation rejected");
    err
}
