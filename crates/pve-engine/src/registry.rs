//! # Validator Registry
//!
//! Binds packed proof identifiers to validator capabilities, each with a
//! revocation flag.
//!
//! ## Lifecycle
//!
//! ```text
//! unregistered ──register──▶ registered+active ──revoke──▶ registered+revoked
//!                                                              (terminal)
//! ```
//!
//! ## Invariants
//!
//! - A binding, once written, is never overwritten.
//! - Registration requires `id.epoch <= latest_epoch`.
//! - Revocation is irreversible; there is no operation that clears the flag.
//! - `unregistered+revoked` is unrepresentable: the flag lives inside the
//!   binding.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use pve_core::{EngineError, ProofIdentifier};
use pve_validator::ValidatorHandle;

/// A validator bound to a proof identifier.
#[derive(Debug, Clone)]
pub struct ValidatorBinding {
    handle: ValidatorHandle,
    revoked: bool,
}

impl ValidatorBinding {
    /// The bound capability, whether or not it is revoked.
    pub fn handle(&self) -> &ValidatorHandle {
        &self.handle
    }

    /// Whether the binding has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }
}

/// Proof identifier → validator binding table.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    bindings: HashMap<ProofIdentifier, ValidatorBinding>,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `id`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EpochExceeded`] if `id.epoch() > latest_epoch`.
    /// - [`EngineError::AlreadyRegistered`] if `id` is already bound.
    pub fn register(
        &mut self,
        id: ProofIdentifier,
        handle: ValidatorHandle,
        latest_epoch: u32,
    ) -> Result<(), EngineError> {
        if u32::from(id.epoch()) > latest_epoch {
            return Err(EngineError::EpochExceeded {
                proof: id,
                epoch: id.epoch(),
                latest: latest_epoch,
            });
        }
        match self.bindings.entry(id) {
            Entry::Occupied(_) => Err(EngineError::AlreadyRegistered { proof: id }),
            Entry::Vacant(slot) => {
                slot.insert(ValidatorBinding {
                    handle,
                    revoked: false,
                });
                Ok(())
            }
        }
    }

    /// Mark the binding for `id` revoked. Returns `false` if it already
    /// was, in which case nothing changes.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownValidator`] if `id` is not bound.
    pub fn revoke(&mut self, id: ProofIdentifier) -> Result<bool, EngineError> {
        let binding = self
            .bindings
            .get_mut(&id)
            .ok_or(EngineError::UnknownValidator { proof: id })?;
        if binding.revoked {
            return Ok(false);
        }
        binding.revoked = true;
        Ok(true)
    }

    /// The handle bound to `id`, if it exists and is active.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownValidator`] if `id` is not bound.
    /// - [`EngineError::DisabledValidator`] if the binding is revoked.
    pub fn resolve(&self, id: ProofIdentifier) -> Result<ValidatorHandle, EngineError> {
        match self.bindings.get(&id) {
            None => Err(EngineError::UnknownValidator { proof: id }),
            Some(binding) if binding.revoked => Err(EngineError::DisabledValidator { proof: id }),
            Some(binding) => Ok(binding.handle.clone()),
        }
    }

    /// The binding for `id`, revoked or not.
    pub fn binding(&self, id: ProofIdentifier) -> Option<&ValidatorBinding> {
        self.bindings.get(&id)
    }

    /// Whether `id` is bound and revoked. Unbound identifiers are not revoked.
    pub fn is_revoked(&self, id: ProofIdentifier) -> bool {
        self.bindings.get(&id).is_some_and(|b| b.revoked)
    }

    /// Number of bindings, revoked included.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no identifier is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ProofIdentifier, &ValidatorBinding)> {
        self.bindings.iter().map(|(id, binding)| (*id, binding))
    }

    /// Reinstate a binding exactly as persisted, including its revoked flag.
    pub(crate) fn restore(
        &mut self,
        id: ProofIdentifier,
        handle: ValidatorHandle,
        revoked: bool,
    ) {
        self.bindings.insert(id, ValidatorBinding { handle, revoked });
    }
}
